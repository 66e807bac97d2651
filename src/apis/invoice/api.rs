use crate::{
    apis::invoice::{Invoice, InvoicePayment, InvoiceUpdate},
    query::Query,
    rest::{Page, RestClient},
    Error,
};
use futures::stream::BoxStream;

/// Stark Bank invoices APIs client.
#[derive(Clone, Debug)]
pub struct InvoicesApi {
    rest: RestClient,
}

impl InvoicesApi {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Creates invoices in bulk. They are returned in the same order, with their ids.
    pub async fn create(&self, invoices: &[Invoice]) -> Result<Vec<Invoice>, Error> {
        self.rest.post(invoices).await
    }

    /// Lazily lists invoices matching `query`.
    pub fn query(&self, query: &Query) -> BoxStream<'static, Result<Invoice, Error>> {
        self.rest.get_list(query)
    }

    /// Gets a single page of invoices.
    pub async fn page(&self, query: &Query) -> Result<Page<Invoice>, Error> {
        self.rest.get_page(query).await
    }

    /// Gets an invoice by id.
    pub async fn get(&self, id: &str) -> Result<Invoice, Error> {
        self.rest.get_id(id, &Query::new()).await
    }

    /// Updates the amount, due date, expiration or status of an invoice.
    ///
    /// Only the fields set on `update` are sent.
    pub async fn update(&self, id: &str, update: &InvoiceUpdate) -> Result<Invoice, Error> {
        self.rest.patch_id(id, update).await
    }

    /// Cancels an invoice that has not been paid yet.
    pub async fn cancel(&self, id: &str) -> Result<Invoice, Error> {
        let update = InvoiceUpdate {
            status: Some("canceled".to_string()),
            ..Default::default()
        };
        self.rest.patch_id(id, &update).await
    }

    /// Downloads the invoice PDF.
    pub async fn pdf(&self, id: &str) -> Result<Vec<u8>, Error> {
        self.rest
            .get_content::<Invoice>(id, "pdf", &Query::new())
            .await
    }

    /// Gets the payer information of a paid invoice.
    pub async fn payment(&self, id: &str) -> Result<InvoicePayment, Error> {
        self.rest.get_sub_resource::<Invoice, InvoicePayment>(id).await
    }
}
