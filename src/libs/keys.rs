//! Storage key names, scoped to a round address.
//!
//! Addresses are lower-cased so checksummed and plain spellings of the same
//! round share one slot.

pub fn get_cart_storage_key(round_address: &str) -> String {
    format!("cart-{}", round_address.to_lowercase())
}

pub fn get_committed_cart_storage_key(round_address: &str) -> String {
    format!("committed-cart-{}", round_address.to_lowercase())
}

pub fn get_contributor_storage_key(round_address: &str) -> String {
    format!("contributor-{}", round_address.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";

    #[test]
    fn keys_ignore_address_case() {
        let lower = CHECKSUMMED.to_lowercase();
        assert_eq!(get_cart_storage_key(CHECKSUMMED), get_cart_storage_key(&lower));
        assert_eq!(
            get_committed_cart_storage_key(CHECKSUMMED),
            get_committed_cart_storage_key(&lower)
        );
        assert_eq!(
            get_contributor_storage_key(CHECKSUMMED),
            get_contributor_storage_key(&lower)
        );
    }

    #[test]
    fn key_kinds_do_not_collide() {
        let a = get_cart_storage_key(CHECKSUMMED);
        let b = get_committed_cart_storage_key(CHECKSUMMED);
        let c = get_contributor_storage_key(CHECKSUMMED);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(a, "cart-0xabcdef0123456789abcdef0123456789abcdef01");
    }
}
