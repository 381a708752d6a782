use {
    crate::app::cli::{Args, CartCmd, ContributorCmd, Subcmd},
    crate::constants::{CHAIN_ID, FROM_BLOCK},
    crate::libs::{
        cart::{check_cart_limits, CartItem, Project},
        config::{load_env, Config},
        contributor::Contributor,
        identity::{Keypair, LocalKeypair},
        storage::{FileStore, RoundStorage},
        writing::{cc, Colors},
    },
    crate::{log, warn},
    alloy::{
        primitives::{Address, U256},
        providers::{DynProvider, Provider},
        signers::local::PrivateKeySigner,
    },
    anyhow::{bail, Context, Result},
    clap::Parser,
    fundinground::{
        format_units, get_contribution_amount, get_round_token, get_total_contributed,
        has_contributor_voted, is_contribution_withdrawn, withdraw_contribution, RoundContext,
    },
    std::str::FromStr,
};

pub async fn init() -> Result<()> {
    load_env();
    let args = Args::parse();
    let cfg = Config::from_env()?;
    run(&cfg, args).await
}

pub async fn run(cfg: &Config, args: Args) -> Result<()> {
    let round = args.round;
    match args.command {
        Subcmd::Amount { contributor } => {
            let ctx = read_context(cfg);
            let who = resolve_contributor(cfg, contributor)?;
            let amount = get_contribution_amount(&ctx, round, who).await?;
            let shown = display_amount(&ctx, round, amount).await;
            let mut out = Colors::new(std::io::stdout().lock());
            out.field("contributor", who);
            out.field("amount", shown);
        }
        Subcmd::Withdrawn { contributor } => {
            let ctx = read_context(cfg);
            let who = resolve_contributor(cfg, contributor)?;
            let withdrawn = is_contribution_withdrawn(&ctx, round, who).await?;
            Colors::new(std::io::stdout().lock()).field("withdrawn", withdrawn);
        }
        Subcmd::Voted { contributor } => {
            let ctx = read_context(cfg);
            let who = resolve_contributor(cfg, contributor)?;
            let voted = has_contributor_voted(&ctx, round, who).await?;
            Colors::new(std::io::stdout().lock()).field("voted", voted);
        }
        Subcmd::Total => {
            let ctx = read_context(cfg);
            let total = get_total_contributed(&ctx, round).await?;
            let shown = display_amount(&ctx, round, total.amount).await;
            let mut out = Colors::new(std::io::stdout().lock());
            out.field("contributions", total.count);
            out.field("amount", shown);
        }
        Subcmd::Withdraw { wait } => {
            let signer = signer(cfg)?;
            let from = signer.address();
            let ctx = RoundContext::with_signer(cfg.rpc_url.clone(), signer, *CHAIN_ID)
                .with_from_block(*FROM_BLOCK);
            log!(cc::YELLOW, "withdrawing contribution of {} from {}", from, round);
            let pending = withdraw_contribution(&ctx, round).await?;
            Colors::new(std::io::stdout().lock()).field("tx", pending.tx_hash());
            if wait {
                let receipt = pending.get_receipt().await.context("waiting for receipt")?;
                let (label, color) = receipt_status(receipt.status());
                Colors::new(std::io::stdout().lock()).cprint(&format!("status: {label}"), color);
            }
        }
        Subcmd::Cart { action } => cart(cfg, round, action)?,
        Subcmd::Contributor { action } => contributor(cfg, round, action)?,
    }
    Ok(())
}

fn receipt_status(success: bool) -> (&'static str, &'static str) {
    if success {
        ("success", cc::LIGHT_GREEN)
    } else {
        ("reverted", cc::RED)
    }
}

fn read_context(cfg: &Config) -> RoundContext<DynProvider> {
    RoundContext::http(cfg.rpc_url.clone()).with_from_block(*FROM_BLOCK)
}

fn signer(cfg: &Config) -> Result<PrivateKeySigner> {
    let key = cfg.require_private_key()?;
    PrivateKeySigner::from_str(key).context("PRIVATE_KEY did not contain a valid hex encoded secret")
}

fn resolve_contributor(cfg: &Config, given: Option<Address>) -> Result<Address> {
    match given {
        Some(a) => Ok(a),
        None => Ok(signer(cfg)
            .context("no contributor given and no PRIVATE_KEY to default to")?
            .address()),
    }
}

/// Amount in token units when the round's token answers, raw base units otherwise.
async fn display_amount<P: Provider + Clone>(ctx: &RoundContext<P>, round: Address, amount: U256) -> String {
    match get_round_token(ctx, round).await {
        Ok(token) => format!("{} {}", format_units(amount, token.decimals), token.symbol),
        Err(e) => {
            warn!("token lookup failed ({e}), showing base units");
            format!("{amount}")
        }
    }
}

fn cart(cfg: &Config, round: Address, action: CartCmd) -> Result<()> {
    let store = FileStore::new(&cfg.store_path);
    let storage = RoundStorage::new(&store, round.to_string());
    let mut out = Colors::new(std::io::stdout().lock());
    match action {
        CartCmd::Show { committed } => {
            let items = if committed {
                storage.load_committed_cart()?
            } else {
                storage.load_cart()?
            };
            if items.is_empty() {
                out.cprint("cart is empty", cc::LIGHT_GRAY);
            }
            for (i, item) in items.iter().enumerate() {
                let color = if item.is_cleared { cc::LIGHT_GRAY } else { cc::CYAN };
                out.cprint(
                    &format!("{i:>2}  {:<32} {:>10}", item.project.name, item.amount),
                    color,
                );
            }
        }
        CartCmd::Add {
            id,
            address,
            name,
            index,
            amount,
        } => {
            let mut items = storage.load_cart()?;
            items.push(CartItem::new(
                Project {
                    id,
                    address,
                    name,
                    description: None,
                    image_url: None,
                    index,
                    is_hidden: false,
                    is_locked: false,
                    extra: Default::default(),
                },
                amount,
            ));
            storage.save_cart(&items)?;
            out.field("items", items.len());
        }
        CartCmd::Remove { position } => {
            let mut items = storage.load_cart()?;
            let Some(item) = items.get_mut(position) else {
                bail!("no cart item at position {position}");
            };
            item.clear();
            storage.save_cart(&items)?;
            out.cprint(&format!("cleared item {position}"), cc::LIGHT_GREEN);
        }
        CartCmd::Commit { decimals } => {
            let items = storage.load_cart()?;
            check_cart_limits(&items, decimals)?;
            storage.save_committed_cart(&items)?;
            out.field("committed", items.len());
        }
    }
    Ok(())
}

fn contributor(cfg: &Config, round: Address, action: ContributorCmd) -> Result<()> {
    let store = FileStore::new(&cfg.store_path);
    let storage = RoundStorage::new(&store, round.to_string());
    let mut out = Colors::new(std::io::stdout().lock());
    match action {
        ContributorCmd::Show => match storage.load_contributor::<LocalKeypair>()? {
            Some(c) => {
                out.field("address", c.keypair.address());
                match c.state_index {
                    Some(i) => out.field("state index", i),
                    None => out.field("state index", "unassigned"),
                }
            }
            None => out.cprint("no contributor stored for this round", cc::LIGHT_GRAY),
        },
        ContributorCmd::Save { key, state_index } => {
            let keypair = LocalKeypair::from_private_key(&key)?;
            let record = Contributor {
                keypair,
                state_index,
            };
            storage.save_contributor(&record)?;
            out.field("saved", record.keypair.address());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use url::Url;

    const ROUND: &str = "0x6666666666666666666666666666666666666666";
    const KEY: &str = "0x7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6";

    fn config(tag: &str) -> Config {
        let name = format!("clrfund-handler-{tag}-{}.json", std::process::id());
        Config {
            rpc_url: Url::parse("http://127.0.0.1:8545").unwrap(),
            private_key: Some(KEY.to_string()),
            store_path: std::env::temp_dir().join("clrfund-tests").join(name),
        }
    }

    fn args(rest: &[&str]) -> Args {
        let mut argv = vec!["clrfund", "--round", ROUND];
        argv.extend_from_slice(rest);
        Args::try_parse_from(argv).unwrap()
    }

    fn cleanup(path: PathBuf) {
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn cart_commands_edit_store() -> Result<()> {
        let cfg = config("cart");
        cleanup(cfg.store_path.clone());
        let add = |name: &'static str| {
            args(&[
                "cart", "add", "--id", name, "--address", "0x01", "--name", name, "--index", "1",
            ])
        };
        run(&cfg, add("alpha")).await?;
        run(&cfg, add("beta")).await?;
        run(&cfg, args(&["cart", "remove", "0"])).await?;
        run(&cfg, args(&["cart", "commit"])).await?;

        let store = FileStore::new(&cfg.store_path);
        let storage = RoundStorage::new(&store, ROUND);
        let committed = storage.load_committed_cart()?;
        assert_eq!(committed.len(), 2);
        assert!(committed[0].is_cleared);
        assert_eq!(committed[1].amount, "5");

        assert!(run(&cfg, args(&["cart", "remove", "9"])).await.is_err());
        cleanup(cfg.store_path);
        Ok(())
    }

    #[tokio::test]
    async fn contributor_save_then_load() -> Result<()> {
        let cfg = config("contributor");
        cleanup(cfg.store_path.clone());
        run(&cfg, args(&["contributor", "save", "--key", KEY, "--state-index", "2"])).await?;
        run(&cfg, args(&["contributor", "show"])).await?;

        let store = FileStore::new(&cfg.store_path);
        let loaded = RoundStorage::new(&store, ROUND)
            .load_contributor::<LocalKeypair>()?
            .context("contributor missing")?;
        assert_eq!(loaded.state_index, Some(2));
        assert_eq!(loaded.keypair.address(), signer(&cfg)?.address());
        cleanup(cfg.store_path);
        Ok(())
    }

    #[test]
    fn receipt_status_labels() {
        assert_eq!(receipt_status(true), ("success", cc::LIGHT_GREEN));
        assert_eq!(receipt_status(false), ("reverted", cc::RED));
    }

    #[test]
    fn contributor_defaults_to_private_key_account() {
        let cfg = config("resolve");
        let expected = signer(&cfg).unwrap().address();
        assert_eq!(resolve_contributor(&cfg, None).unwrap(), expected);

        let mut no_key = cfg.clone();
        no_key.private_key = None;
        assert!(resolve_contributor(&no_key, None).is_err());
        assert_eq!(
            resolve_contributor(&no_key, Some(Address::ZERO)).unwrap(),
            Address::ZERO
        );
    }
}
