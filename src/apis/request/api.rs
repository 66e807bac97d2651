use crate::{
    query::Query,
    rest::{RawResponse, RestClient},
    Error,
};
use serde_json::Value;

/// Signed access to endpoints that have no typed client in this crate.
///
/// Paths are relative to the versioned API root, e.g. `"balance"` or `"invoice/123/qrcode"`.
/// Non-2xx responses fail with the same errors as the typed clients.
#[derive(Clone, Debug)]
pub struct RequestsApi {
    rest: RestClient,
}

impl RequestsApi {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Sends a signed `GET` to `path`, with `query` as URL parameters.
    pub async fn get(&self, path: &str, query: &Query) -> Result<RawResponse, Error> {
        self.rest.get_raw(path, query).await
    }

    /// Sends a signed `POST` to `path` with `body` as the JSON payload.
    pub async fn post(&self, path: &str, body: &Value, query: &Query) -> Result<RawResponse, Error> {
        self.rest.post_raw(path, body, query).await
    }

    /// Sends a signed `PATCH` to `path` with `body` as the JSON payload.
    pub async fn patch(&self, path: &str, body: &Value, query: &Query) -> Result<RawResponse, Error> {
        self.rest.patch_raw(path, body, query).await
    }

    /// Sends a signed `PUT` to `path` with `body` as the JSON payload.
    pub async fn put(&self, path: &str, body: &Value, query: &Query) -> Result<RawResponse, Error> {
        self.rest.put_raw(path, body, query).await
    }

    /// Sends a signed `DELETE` to `path`.
    pub async fn delete(&self, path: &str, query: &Query) -> Result<RawResponse, Error> {
        self.rest.delete_raw(path, query).await
    }
}
