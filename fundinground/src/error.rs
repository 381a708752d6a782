//! Errors surfaced by round queries and transactions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("Transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("Contract error: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("Log decode error: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    #[error("Contribution total overflowed after {0} events")]
    Overflow(usize),
}

pub type Result<T> = std::result::Result<T, RoundError>;
