use crate::Error;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Middleware to inject the `User-Agent`, `Accept-Language` and `Content-Type` headers
/// to all outgoing requests.
pub struct InjectHeadersMiddleware {
    user_agent: HeaderValue,
    language: HeaderValue,
}

impl InjectHeadersMiddleware {
    pub fn new(language: &str) -> Result<Self, Error> {
        Ok(Self {
            user_agent: HeaderValue::from_static(concat!(
                "Rust-SDK-",
                env!("CARGO_PKG_NAME"),
                "-",
                env!("CARGO_PKG_VERSION")
            )),
            language: HeaderValue::from_str(language).map_err(|e| Error::Other(e.into()))?,
        })
    }
}

#[async_trait]
impl Middleware for InjectHeadersMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let headers = req.headers_mut();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(ACCEPT_LANGUAGE, self.language.clone());
        headers
            .entry(CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static("application/json"));

        next.run(req, extensions).await
    }
}
