pub mod cart;
pub mod config;
pub mod contributor;
pub mod error;
pub mod identity;
pub mod keys;
pub mod storage;
pub mod writing;
