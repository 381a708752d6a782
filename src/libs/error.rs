//! Crate-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid key material: {0}")]
    Key(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Policy violation: {0}")]
    Policy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Round(#[from] fundinground::RoundError),
}

pub type Result<T> = std::result::Result<T, Error>;
