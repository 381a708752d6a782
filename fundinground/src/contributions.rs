//! Read-only queries over a round's event history.
//!
//! Every query opens its own binding, scans logs from `ctx.from_block` and
//! derives its answer fresh. Nothing is cached between calls.

use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::{Filter, Log as RpcLog};
use alloy::sol_types::SolEvent;

use crate::abi::{address_topic, IERC20Meta, IFundingRound};
use crate::context::RoundContext;
use crate::error::{Result, RoundError};
use crate::log;
use crate::writing::cc;

/// Aggregate of every contribution made to a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionTotal {
    pub count: usize,
    pub amount: U256,
}

/// The ERC20 a round accepts contributions in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

fn round_filter<P>(
    ctx: &RoundContext<P>,
    round: Address,
    signature: B256,
    counterparty: Option<Address>,
) -> Filter {
    let f = Filter::new()
        .address(round)
        .event_signature(signature)
        .from_block(ctx.from_block);
    match counterparty {
        Some(who) => f.topic1(address_topic(who)),
        None => f,
    }
}

async fn query_logs<P: Provider + Clone>(ctx: &RoundContext<P>, filter: Filter) -> Result<Vec<RpcLog>> {
    Ok(ctx.provider.get_logs(&filter).await?)
}

/// Amount carried by the contributor's contribution event, zero if there is none.
///
/// The contract accepts at most one contribution per address, so the earliest
/// event is authoritative. Extra events would mean that assumption broke and
/// are only logged.
pub fn contribution_amount_from(logs: &[RpcLog]) -> Result<U256> {
    let Some(first) = logs.first() else {
        return Ok(U256::ZERO);
    };
    if logs.len() > 1 {
        log!(cc::ORANGE, "expected one contribution event, found {}", logs.len());
    }
    let event = IFundingRound::Contribution::decode_log_data(first.data())?;
    Ok(event._amount)
}

/// Folds contribution events into a count and an exact sum.
pub fn total_from(logs: &[RpcLog]) -> Result<ContributionTotal> {
    let mut amount = U256::ZERO;
    for (i, l) in logs.iter().enumerate() {
        let event = IFundingRound::Contribution::decode_log_data(l.data())?;
        amount = amount
            .checked_add(event._amount)
            .ok_or(RoundError::Overflow(i + 1))?;
    }
    Ok(ContributionTotal {
        count: logs.len(),
        amount,
    })
}

pub async fn get_contribution_amount<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
    contributor: Address,
) -> Result<U256> {
    let filter = round_filter(
        ctx,
        round,
        IFundingRound::Contribution::SIGNATURE_HASH,
        Some(contributor),
    );
    let logs = query_logs(ctx, filter).await?;
    contribution_amount_from(&logs)
}

pub async fn is_contribution_withdrawn<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
    contributor: Address,
) -> Result<bool> {
    let filter = round_filter(
        ctx,
        round,
        IFundingRound::ContributionWithdrawn::SIGNATURE_HASH,
        Some(contributor),
    );
    let logs = query_logs(ctx, filter).await?;
    Ok(!logs.is_empty())
}

pub async fn get_total_contributed<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
) -> Result<ContributionTotal> {
    let filter = round_filter(ctx, round, IFundingRound::Contribution::SIGNATURE_HASH, None);
    let logs = query_logs(ctx, filter).await?;
    let total = total_from(&logs)?;
    log!(cc::LIGHT_BLUE, "round {round}: {} contributions, {} total", total.count, total.amount);
    Ok(total)
}

pub async fn has_contributor_voted<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
    contributor: Address,
) -> Result<bool> {
    let filter = round_filter(
        ctx,
        round,
        IFundingRound::Voted::SIGNATURE_HASH,
        Some(contributor),
    );
    let logs = query_logs(ctx, filter).await?;
    Ok(!logs.is_empty())
}

/// Native token of the round, with its symbol and decimals.
pub async fn get_round_token<P: Provider + Clone>(
    ctx: &RoundContext<P>,
    round: Address,
) -> Result<RoundToken> {
    let token = ctx.round(round).nativeToken().call().await?;
    let erc = IERC20Meta::new(token, ctx.provider.clone());
    let decimals = erc.decimals().call().await?;
    let symbol = erc.symbol().call().await?;
    Ok(RoundToken {
        address: token,
        symbol,
        decimals,
    })
}

pub fn format_units(amount: U256, decimals: u8) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return format!("{whole}");
    }
    let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use alloy::providers::ProviderBuilder;
    use alloy::transports::mock::Asserter;

    const ROUND: Address = address!("0x2222222222222222222222222222222222222222");
    const ALICE: Address = address!("0x000000000000000000000000000000000000a11c");
    const BOB: Address = address!("0x0000000000000000000000000000000000000b0b");

    fn event_log<E: SolEvent>(event: E) -> RpcLog {
        RpcLog {
            inner: alloy::primitives::Log {
                address: ROUND,
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn contribution(sender: Address, amount: u64) -> RpcLog {
        event_log(IFundingRound::Contribution {
            _sender: sender,
            _amount: U256::from(amount),
        })
    }

    fn mocked(responses: Vec<Vec<RpcLog>>) -> RoundContext<impl Provider + Clone> {
        let asserter = Asserter::new();
        for logs in &responses {
            asserter.push_success(logs);
        }
        RoundContext::new(ProviderBuilder::new().connect_mocked_client(asserter))
    }

    #[test]
    fn filter_targets_round_and_indexed_contributor() {
        let ctx = mocked(vec![]);
        let f = round_filter(
            &ctx,
            ROUND,
            IFundingRound::Voted::SIGNATURE_HASH,
            Some(ALICE),
        );
        assert!(f.address.matches(&ROUND));
        assert!(f.topics[0].matches(&IFundingRound::Voted::SIGNATURE_HASH));
        assert!(f.topics[1].matches(&address_topic(ALICE)));
        assert!(!f.topics[1].matches(&address_topic(BOB)));
        assert_eq!(f.get_from_block(), Some(0));
    }

    #[test]
    fn empty_history_sums_to_zero() {
        assert_eq!(total_from(&[]).unwrap(), ContributionTotal::default());
        assert_eq!(contribution_amount_from(&[]).unwrap(), U256::ZERO);
    }

    #[test]
    fn first_contribution_wins() {
        let logs = vec![contribution(ALICE, 7), contribution(ALICE, 9)];
        assert_eq!(contribution_amount_from(&logs).unwrap(), U256::from(7u64));
    }

    #[test]
    fn total_overflow_is_an_error() {
        let big = event_log(IFundingRound::Contribution {
            _sender: ALICE,
            _amount: U256::MAX,
        });
        let logs = vec![big, contribution(BOB, 1)];
        assert!(matches!(total_from(&logs), Err(RoundError::Overflow(2))));
    }

    #[test]
    fn foreign_event_fails_to_decode() {
        let logs = vec![event_log(IFundingRound::Voted { _contributor: ALICE })];
        assert!(matches!(total_from(&logs), Err(RoundError::Decode(_))));
    }

    #[tokio::test]
    async fn contribution_amount_for_contributor_and_stranger() {
        let ctx = mocked(vec![vec![contribution(ALICE, 100)], vec![]]);
        let a = get_contribution_amount(&ctx, ROUND, ALICE).await.unwrap();
        let b = get_contribution_amount(&ctx, ROUND, BOB).await.unwrap();
        assert_eq!(a, U256::from(100u64));
        assert_eq!(b, U256::ZERO);
    }

    #[tokio::test]
    async fn total_contributed_counts_and_sums() {
        let logs = vec![
            contribution(ALICE, 10),
            contribution(BOB, 20),
            contribution(address!("0x0000000000000000000000000000000000000c0c"), 30),
        ];
        let ctx = mocked(vec![logs]);
        let total = get_total_contributed(&ctx, ROUND).await.unwrap();
        assert_eq!(
            total,
            ContributionTotal {
                count: 3,
                amount: U256::from(60u64)
            }
        );
    }

    #[tokio::test]
    async fn withdrawn_flag_follows_events() {
        let withdrawn = event_log(IFundingRound::ContributionWithdrawn { _contributor: ALICE });
        let ctx = mocked(vec![vec![], vec![withdrawn]]);
        assert!(!is_contribution_withdrawn(&ctx, ROUND, ALICE).await.unwrap());
        assert!(is_contribution_withdrawn(&ctx, ROUND, ALICE).await.unwrap());
    }

    #[tokio::test]
    async fn voted_flag_follows_events() {
        let voted = event_log(IFundingRound::Voted { _contributor: BOB });
        let ctx = mocked(vec![vec![voted], vec![]]);
        assert!(has_contributor_voted(&ctx, ROUND, BOB).await.unwrap());
        assert!(!has_contributor_voted(&ctx, ROUND, ALICE).await.unwrap());
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("node unavailable");
        let ctx = RoundContext::new(ProviderBuilder::new().connect_mocked_client(asserter));
        let err = get_total_contributed(&ctx, ROUND).await.unwrap_err();
        assert!(matches!(err, RoundError::Transport(_)));
    }

    #[test]
    fn format_units_trims_fraction() {
        let v = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(v, 18), "1.5");
        assert_eq!(format_units(U256::from(60u64), 0), "60");
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }
}
