//! APIs and models related to invoices.

mod api;
mod model;

pub use api::InvoicesApi;
pub use model::*;
