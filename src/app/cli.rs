use alloy::primitives::Address;
use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_CONTRIBUTION_AMOUNT;

#[derive(Parser, Debug)]
#[command(name = "clrfund", about = "Funding round contribution client")]
pub struct Args {
    #[arg(short, long)]
    /// Funding round contract address
    pub round: Address,

    #[command(subcommand)]
    pub command: Subcmd,
}

#[derive(Subcommand, Debug)]
pub enum Subcmd {
    /// Amount contributed by an address (defaults to the PRIVATE_KEY account)
    Amount { contributor: Option<Address> },

    /// Whether an address withdrew its contribution
    Withdrawn { contributor: Option<Address> },

    /// Whether an address has voted
    Voted { contributor: Option<Address> },

    /// Number of contributions and their sum
    Total,

    /// Withdraw the PRIVATE_KEY account's contribution
    Withdraw {
        #[arg(long)]
        /// Wait for the transaction receipt
        wait: bool,
    },

    /// Inspect or edit the locally stored cart
    Cart {
        #[command(subcommand)]
        action: CartCmd,
    },

    /// Inspect or store the contributor record
    Contributor {
        #[command(subcommand)]
        action: ContributorCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum CartCmd {
    Show {
        #[arg(long)]
        /// Show the committed cart instead of the working one
        committed: bool,
    },

    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        index: u64,
        #[arg(long, default_value_t = DEFAULT_CONTRIBUTION_AMOUNT.to_string())]
        amount: String,
    },

    /// Clear the item at a cart position
    Remove { position: usize },

    /// Check limits and store the cart as committed
    Commit {
        #[arg(long, default_value_t = 18)]
        /// Decimals of the round's token
        decimals: u8,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContributorCmd {
    Show,

    Save {
        #[arg(long)]
        /// Hex private key of the contributor keypair
        key: String,
        #[arg(long)]
        state_index: Option<u64>,
    },
}
