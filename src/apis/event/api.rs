use crate::{
    apis::event::{Event, EventUpdate},
    parser::EventParser,
    query::Query,
    rest::{Page, RestClient},
    Error,
};
use futures::stream::BoxStream;

/// Stark Bank webhook events APIs client.
#[derive(Clone, Debug)]
pub struct EventsApi {
    rest: RestClient,
    parser: EventParser,
}

impl EventsApi {
    pub(crate) fn new(rest: RestClient, parser: EventParser) -> Self {
        Self { rest, parser }
    }

    /// Lazily lists events, e.g. the undelivered ones with
    /// `Query::new().set("isDelivered", false)`.
    pub fn query(&self, query: &Query) -> BoxStream<'static, Result<Event, Error>> {
        self.rest.get_list(query)
    }

    /// Gets a single page of events.
    pub async fn page(&self, query: &Query) -> Result<Page<Event>, Error> {
        self.rest.get_page(query).await
    }

    /// Gets an event by id.
    pub async fn get(&self, id: &str) -> Result<Event, Error> {
        self.rest.get_id(id, &Query::new()).await
    }

    /// Deletes an event.
    pub async fn delete(&self, id: &str) -> Result<Event, Error> {
        self.rest.delete_id(id).await
    }

    /// Marks an event as delivered (or not), e.g. after processing it from a listing
    /// rather than from the webhook.
    pub async fn update(&self, id: &str, is_delivered: bool) -> Result<Event, Error> {
        self.rest
            .patch_id(id, &EventUpdate { is_delivered })
            .await
    }

    /// Authenticates and decodes a webhook body.
    ///
    /// `content` must be the request body exactly as received and `signature` the value of
    /// its `Digital-Signature` header.
    pub async fn parse(&self, content: &str, signature: &str) -> Result<Event, Error> {
        self.parser
            .parse_and_verify(content, signature, Some("event"))
            .await
    }
}
