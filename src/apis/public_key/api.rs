use crate::{
    apis::public_key::PublicKeyRecord,
    query::Query,
    rest::{Page, RestClient},
    Error,
};
use futures::stream::BoxStream;

/// Stark Bank public keys APIs client.
#[derive(Clone, Debug)]
pub struct PublicKeysApi {
    rest: RestClient,
}

impl PublicKeysApi {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Lists public keys, most recent first.
    pub fn query(&self, query: &Query) -> BoxStream<'static, Result<PublicKeyRecord, Error>> {
        self.rest.get_list(query)
    }

    /// Gets a single page of public keys.
    pub async fn page(&self, query: &Query) -> Result<Page<PublicKeyRecord>, Error> {
        self.rest.get_page(query).await
    }
}
