//! Untyped access to any endpoint of the API.

mod api;

pub use api::RequestsApi;
