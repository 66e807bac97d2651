//! APIs and models related to webhook events.

mod api;
mod model;

pub use api::EventsApi;
pub use model::*;
