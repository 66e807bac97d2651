pub mod test_context;

use wiremock::{Match, Request};

/// Matches list requests for the first page, i.e. without a `cursor` query parameter.
pub struct FirstPage;

impl Match for FirstPage {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "cursor")
    }
}
