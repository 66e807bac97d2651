//! Generic REST engine shared by every resource.

use crate::{
    apis::StarkClientInner,
    common::MAX_PAGE_SIZE,
    query::Query,
    resource::{Entity, Resource},
    Error,
};
use futures::{
    stream::{self, BoxStream},
    StreamExt, TryStreamExt,
};
use reqwest::{header::HeaderMap, Method, Url};
use reqwest_middleware::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use urlencoding::encode;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Items in the order returned by the server.
    pub items: Vec<R>,
    /// Continuation token for the next page. `None` means there are no more pages.
    pub cursor: Option<String>,
}

/// Undecoded successful response, returned by the passthrough operations.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status returned by the server, always a success.
    pub status: u16,
    /// Response headers, as received.
    pub headers: HeaderMap,
    /// Undecoded response body.
    pub content: Vec<u8>,
}

impl RawResponse {
    /// Body as UTF-8 text, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.content).map_err(Error::from)
    }
}

/// Uniform CRUD and pagination engine.
///
/// Every operation is a single request/response exchange: nothing is retried, and
/// failures come back as [`Error::ApiError`](crate::Error::ApiError).
#[derive(Clone, Debug)]
pub struct RestClient {
    inner: Arc<StarkClientInner>,
}

impl RestClient {
    pub(crate) fn new(inner: Arc<StarkClientInner>) -> Self {
        Self { inner }
    }

    /// Fetches a single item by id.
    ///
    /// A missing item is an error, check it with [`Error::is_not_found`](crate::Error::is_not_found).
    #[tracing::instrument(name = "Get Resource by ID", skip(self, query), fields(resource = R::NAME))]
    pub async fn get_id<R: Resource>(&self, id: &str, query: &Query) -> Result<R, Error> {
        let path = format!("{}/{}", R::endpoint(), encode(id));
        let body = self
            .send_json(self.request(Method::GET, &path)?.query(&query.to_pairs()))
            .await?;

        R::decode(take_key(body, &R::json_key())?)
    }

    /// Fetches a binary sub-resource of an item, e.g. `invoice/{id}/pdf`.
    #[tracing::instrument(name = "Get Resource Content", skip(self, query), fields(resource = R::NAME))]
    pub async fn get_content<R: Resource>(
        &self,
        id: &str,
        sub_resource: &str,
        query: &Query,
    ) -> Result<Vec<u8>, Error> {
        let path = format!("{}/{}/{}", R::endpoint(), encode(id), sub_resource);
        let res = self
            .request(Method::GET, &path)?
            .query(&query.to_pairs())
            .send()
            .await?;

        Ok(res.bytes().await?.to_vec())
    }

    /// Fetches a typed sub-resource of an item, e.g. `invoice/{id}/payment`.
    #[tracing::instrument(
        name = "Get Sub Resource",
        skip(self),
        fields(resource = R::NAME, sub_resource = S::NAME)
    )]
    pub async fn get_sub_resource<R: Resource, S: Resource>(&self, id: &str) -> Result<S, Error> {
        let path = format!("{}/{}/{}", R::endpoint(), encode(id), S::endpoint());
        let body = self.send_json(self.request(Method::GET, &path)?).await?;

        S::decode(take_key(body, &S::json_key())?)
    }

    /// Fetches a single page. The caller drives continuation through the returned cursor.
    #[tracing::instrument(name = "Get Page", skip(self, query), fields(resource = R::NAME))]
    pub async fn get_page<R: Resource>(&self, query: &Query) -> Result<Page<R>, Error> {
        let body = self
            .send_json(
                self.request(Method::GET, &R::endpoint())?
                    .query(&query.to_pairs()),
            )
            .await?;

        decode_page(body)
    }

    /// Lazily walks every page of a list endpoint.
    ///
    /// A page is requested only when the previous one has been fully consumed, and never
    /// after `query.limit` items have been yielded. Without a limit, the stream ends when the
    /// server stops returning a cursor.
    pub fn get_list<R: Resource>(&self, query: &Query) -> BoxStream<'static, Result<R, Error>> {
        let state = ListState {
            rest: self.clone(),
            remaining: query.limit,
            query: query.clone(),
            exhausted: false,
        };

        stream::try_unfold(state, |mut state| async move {
            if state.exhausted || state.remaining == Some(0) {
                return Ok(None);
            }

            let mut page_query = state.query.clone();
            page_query.limit = state.remaining.map(|r| r.min(MAX_PAGE_SIZE));
            let page = state.rest.get_page::<R>(&page_query).await?;

            let mut items = page.items;
            if let Some(remaining) = state.remaining.as_mut() {
                items.truncate(*remaining);
                *remaining -= items.len();
            }
            state.exhausted = page.cursor.is_none();
            state.query.cursor = page.cursor;

            Ok::<_, Error>(Some((items, state)))
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<R, Error>)))
        .try_flatten()
        .boxed()
    }

    /// Creates items in bulk.
    ///
    /// Typed entities are encoded through their [`Resource`] codec, raw JSON maps are sent
    /// without their `null` fields.
    #[tracing::instrument(
        name = "Create Resources",
        skip(self, entities),
        fields(resource = R::NAME, count = entities.len())
    )]
    pub async fn post<R: Resource, E: Entity>(&self, entities: &[E]) -> Result<Vec<R>, Error> {
        let encoded = entities
            .iter()
            .map(|entity| entity.to_json())
            .collect::<Result<Vec<_>, _>>()?;
        let plural = R::json_key_plural();
        let payload = json!({ plural.as_str(): encoded });

        let body = self
            .send_json(self.request(Method::POST, &R::endpoint())?.json(&payload))
            .await?;

        decode_list(take_key(body, &plural)?)
    }

    /// Creates a single item, for endpoints that do not accept batches.
    #[tracing::instrument(name = "Create Resource", skip(self, entity), fields(resource = R::NAME))]
    pub async fn post_single<R: Resource, E: Entity>(&self, entity: &E) -> Result<R, Error> {
        let payload = entity.to_json()?;
        let body = self
            .send_json(self.request(Method::POST, &R::endpoint())?.json(&payload))
            .await?;

        R::decode(take_key(body, &R::json_key())?)
    }

    /// Partially updates an item.
    #[tracing::instrument(name = "Update Resource", skip(self, payload), fields(resource = R::NAME))]
    pub async fn patch_id<R: Resource, E: Entity>(
        &self,
        id: &str,
        payload: &E,
    ) -> Result<R, Error> {
        let path = format!("{}/{}", R::endpoint(), encode(id));
        let payload = payload.to_json()?;
        let body = self
            .send_json(self.request(Method::PATCH, &path)?.json(&payload))
            .await?;

        R::decode(take_key(body, &R::json_key())?)
    }

    /// Deletes an item and returns its last representation.
    #[tracing::instrument(name = "Delete Resource", skip(self), fields(resource = R::NAME))]
    pub async fn delete_id<R: Resource>(&self, id: &str) -> Result<R, Error> {
        let path = format!("{}/{}", R::endpoint(), encode(id));
        let body = self.send_json(self.request(Method::DELETE, &path)?).await?;

        R::decode(take_key(body, &R::json_key())?)
    }

    /// Untyped `GET` against any path below the versioned API root.
    #[tracing::instrument(name = "GET Raw", skip(self, query))]
    pub async fn get_raw(&self, path: &str, query: &Query) -> Result<RawResponse, Error> {
        self.send_raw(self.request(Method::GET, path)?.query(&query.to_pairs()))
            .await
    }

    /// Untyped `POST`.
    #[tracing::instrument(name = "POST Raw", skip(self, body, query))]
    pub async fn post_raw(
        &self,
        path: &str,
        body: &Value,
        query: &Query,
    ) -> Result<RawResponse, Error> {
        self.send_raw(
            self.request(Method::POST, path)?
                .query(&query.to_pairs())
                .json(body),
        )
        .await
    }

    /// Untyped `PATCH`.
    #[tracing::instrument(name = "PATCH Raw", skip(self, body, query))]
    pub async fn patch_raw(
        &self,
        path: &str,
        body: &Value,
        query: &Query,
    ) -> Result<RawResponse, Error> {
        self.send_raw(
            self.request(Method::PATCH, path)?
                .query(&query.to_pairs())
                .json(body),
        )
        .await
    }

    /// Untyped `PUT`.
    #[tracing::instrument(name = "PUT Raw", skip(self, body, query))]
    pub async fn put_raw(
        &self,
        path: &str,
        body: &Value,
        query: &Query,
    ) -> Result<RawResponse, Error> {
        self.send_raw(
            self.request(Method::PUT, path)?
                .query(&query.to_pairs())
                .json(body),
        )
        .await
    }

    /// Untyped `DELETE`.
    #[tracing::instrument(name = "DELETE Raw", skip(self, query))]
    pub async fn delete_raw(&self, path: &str, query: &Query) -> Result<RawResponse, Error> {
        self.send_raw(self.request(Method::DELETE, path)?.query(&query.to_pairs()))
            .await
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.inner
            .api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Other(e.into()))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        Ok(self.inner.client.request(method, self.url(path)?))
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, Error> {
        let bytes = request.send().await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<RawResponse, Error> {
        let res = request.send().await?;
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let content = res.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }
}

/// Pagination state carried between two pages of [`RestClient::get_list`].
struct ListState {
    rest: RestClient,
    query: Query,
    remaining: Option<usize>,
    exhausted: bool,
}

fn take_key(mut body: Value, key: &str) -> Result<Value, Error> {
    match body.get_mut(key) {
        Some(value) => Ok(value.take()),
        None => Err(Error::DecodeError(serde::de::Error::custom(format!(
            "missing field `{}` in response",
            key
        )))),
    }
}

fn decode_list<R: Resource>(value: Value) -> Result<Vec<R>, Error> {
    match value {
        Value::Array(items) => items.into_iter().map(R::decode).collect(),
        other => Err(Error::DecodeError(serde::de::Error::custom(format!(
            "expected a list of {}, got {}",
            R::json_key_plural(),
            other
        )))),
    }
}

fn decode_page<R: Resource>(mut body: Value) -> Result<Page<R>, Error> {
    let cursor = body
        .get("cursor")
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string);
    let items = decode_list(take_key(body.take(), &R::json_key_plural())?)?;

    Ok(Page { items, cursor })
}
