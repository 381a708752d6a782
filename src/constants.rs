#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub CHAIN_ID: u64   = ("CHAIN_ID", 1);
    pub FROM_BLOCK: u64 = ("FROM_BLOCK", 0);
}

pub const DEFAULT_CONTRIBUTION_AMOUNT: u64 = 5;

// Matches the cap in FundingRound.sol
pub const MAX_CONTRIBUTION_AMOUNT: u64 = 10_000;

// A full batch burns 9_100_000 gas at 700_000 gas per message
pub const MAX_CART_SIZE: usize = 13;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_size_fits_gas_ceiling() {
        assert_eq!(MAX_CART_SIZE as u64 * 700_000, 9_100_000);
        assert!(DEFAULT_CONTRIBUTION_AMOUNT <= MAX_CONTRIBUTION_AMOUNT);
    }
}
