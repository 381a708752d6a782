use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use url::Url;

use crate::abi::IFundingRound::{self, IFundingRoundInstance};

/// Everything a round call needs, passed explicitly instead of living in a
/// process-wide provider handle.
#[derive(Clone)]
pub struct RoundContext<P> {
    pub provider: P,
    /// Endpoint the provider talks to; `None` for in-memory transports.
    pub rpc_url: Option<Url>,
    /// First block scanned by log queries.
    pub from_block: u64,
}

impl<P: Provider + Clone> RoundContext<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            rpc_url: None,
            from_block: 0,
        }
    }

    pub fn with_from_block(mut self, from_block: u64) -> Self {
        self.from_block = from_block;
        self
    }

    /// Short-lived binding to the round contract at `address`.
    pub fn round(&self, address: Address) -> IFundingRoundInstance<P, Ethereum> {
        IFundingRound::new(address, self.provider.clone())
    }
}

impl RoundContext<DynProvider> {
    /// Read-only context over plain HTTP JSON-RPC.
    pub fn http(rpc_url: Url) -> Self {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.clone())
            .erased();
        Self {
            provider,
            rpc_url: Some(rpc_url),
            from_block: 0,
        }
    }

    /// Context whose provider signs and sends transactions as `signer`.
    pub fn with_signer(rpc_url: Url, signer: PrivateKeySigner, chain_id: u64) -> Self {
        let signer = signer.with_chain_id(Some(chain_id));
        let provider = ProviderBuilder::new()
            .with_chain_id(chain_id)
            .wallet(signer)
            .connect_http(rpc_url.clone())
            .erased();
        Self {
            provider,
            rpc_url: Some(rpc_url),
            from_block: 0,
        }
    }
}
