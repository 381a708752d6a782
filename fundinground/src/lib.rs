pub mod abi;
pub mod context;
pub mod contributions;
pub mod error;
pub mod withdraw;
pub mod writing;

pub use context::*;
pub use contributions::*;
pub use error::{Result, RoundError};
pub use withdraw::*;
