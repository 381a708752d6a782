pub mod app;
pub mod constants;
pub mod libs;

pub use libs::cart::{deserialize_cart, serialize_cart, CartItem, Project};
pub use libs::contributor::{deserialize_contributor_data, serialize_contributor_data, Contributor};
pub use libs::error::{Error, Result};
pub use libs::keys::{get_cart_storage_key, get_committed_cart_storage_key, get_contributor_storage_key};
