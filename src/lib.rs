//! A Rust client for the [Stark Bank](https://starkbank.com) APIs.
//!
//! Check out also the official Stark Bank [API documentation](https://starkbank.com/docs/api).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Every request is signed with an ECDSA secp256k1 key. Generate a key pair and register
//! the public key on a project (or organization) in the Stark Bank web banking.
//!
//! ```sh
//! openssl ecparam -name secp256k1 -genkey -noout -out private-key.pem
//! openssl ec -in private-key.pem -pubout -out public-key.pem
//! ```
//!
//! ## Initialize a new `StarkClient`
//!
//! ```rust,no_run
//! # use starkbank_rust::{StarkClient, Error, client::Environment, credential::Credential};
//! # fn main() -> Result<(), Error> {
//! # let private_key_pem = String::new();
//! let credential = Credential::project("9999999999999999", private_key_pem, Environment::Sandbox)?;
//! let stark = StarkClient::new(credential)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Create invoices
//!
//! ```rust,no_run
//! # use starkbank_rust::{StarkClient, Error, apis::invoice::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let stark: StarkClient = unreachable!();
//! #
//! let invoice = InvoiceBuilder::default()
//!     .amount(400000)
//!     .tax_id("012.345.678-90")
//!     .name("Iron Bank S.A.")
//!     .build()
//!     .unwrap();
//!
//! let created = stark.invoices.create(&[invoice]).await?;
//! println!("Created new invoice: {:?}", created[0].id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Listing invoices
//!
//! Listing is lazy: pages are fetched only as the stream is consumed, and never past `limit`.
//!
//! ```rust,no_run
//! # use starkbank_rust::{StarkClient, Error, query::Query};
//! # use futures::TryStreamExt;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let stark: StarkClient = unreachable!();
//! let mut invoices = stark.invoices.query(&Query::new().limit(250).set("status", "paid"));
//! while let Some(invoice) = invoices.try_next().await? {
//!     tracing::info!("Invoice {:?}: {} cents", invoice.id, invoice.amount);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Receiving webhooks
//!
//! ```rust,no_run
//! # use starkbank_rust::{StarkClient, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let stark: StarkClient = unreachable!();
//! # let (body, digital_signature) = (String::new(), String::new());
//! let event = stark.events.parse(&body, &digital_signature).await?;
//! println!("Event {} from subscription {:?}", event.id, event.subscription);
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! ```shell
//! cargo run --example list_invoices
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod credential;
pub mod error;
pub mod key_cache;
mod middlewares;
pub mod parser;
pub mod query;
pub mod resource;
pub mod rest;
pub mod signature;

pub use client::StarkClient;
pub use common::DIGITAL_SIGNATURE_HEADER;
pub use error::Error;
