//! Clients for the various Stark Bank APIs.

use crate::client::Environment;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::{Debug, Formatter};

pub mod event;
pub mod invoice;
pub mod public_key;
pub mod request;

pub(crate) struct StarkClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) environment: Environment,
    pub(crate) api_url: Url,
}

impl Debug for StarkClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarkClientInner")
            .field("environment", &self.environment)
            .field("api_url", &self.api_url.as_str())
            .finish_non_exhaustive()
    }
}
