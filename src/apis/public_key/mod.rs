//! Stark Bank public keys, used to verify signed content.

mod api;
mod model;

pub use api::PublicKeysApi;
pub use model::*;
