use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::{PendingTransactionBuilder, Provider};

use crate::context::RoundContext;
use crate::error::Result;
use crate::log;
use crate::writing::cc;

/// Submit `withdrawContribution()` on the round, signed by the wallet attached
/// to the context's provider. Returns as soon as the node accepts the
/// transaction; confirmation is left to the caller.
pub async fn withdraw_contribution<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
) -> Result<PendingTransactionBuilder<Ethereum>> {
    let pending = ctx.round(round).withdrawContribution().send().await?;
    log!(cc::LIGHT_GREEN, "withdrawContribution sent: {}", pending.tx_hash());
    Ok(pending)
}
