use alloy::primitives::{Address, B256};

alloy::sol! {
    // Subset of FundingRound.sol consumed by the client.
    #[sol(rpc)]
    interface IFundingRound {
        event Contribution(address indexed _sender, uint256 _amount);
        event ContributionWithdrawn(address indexed _contributor);
        event Voted(address indexed _contributor);

        function nativeToken() view returns (address);

        function withdrawContribution();
    }

    #[sol(rpc)]
    interface IERC20Meta {
        function decimals() view returns (uint8);
        function symbol() view returns (string);
    }
}

/// Left-pad an address into the 32-byte word used for indexed event topics.
pub fn address_topic(addr: Address) -> B256 {
    addr.into_word()
}
