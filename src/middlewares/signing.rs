use crate::{
    common::{ACCESS_ID_HEADER, ACCESS_SIGNATURE_HEADER, ACCESS_TIME_HEADER},
    credential::Credential,
    signature::sign,
    Error,
};
use async_trait::async_trait;
use chrono::Utc;
use openssl::{ec::EcKey, pkey::Private};
use reqwest::{header::HeaderValue, Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Middleware to attach the access headers to all outgoing requests.
///
/// The signed message is `<access-id>:<access-time>:<body>`, with an empty body
/// for requests that carry none.
pub struct SigningMiddleware {
    access_id: String,
    private_key: EcKey<Private>,
}

impl SigningMiddleware {
    pub fn new(credential: &Credential) -> Result<Self, Error> {
        Ok(Self {
            access_id: credential.access_id(),
            private_key: credential.signing_key()?,
        })
    }
}

#[async_trait]
impl Middleware for SigningMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let access_time = Utc::now().timestamp().to_string();

        let body: &[u8] = match req.body() {
            Some(body) => body
                .as_bytes()
                .ok_or_else(|| anyhow::anyhow!("Cannot sign a streaming request body"))?,
            None => &[],
        };

        let mut message = format!("{}:{}:", self.access_id, access_time).into_bytes();
        message.extend_from_slice(body);
        let signature = sign(&message, &self.private_key)?;

        let headers = req.headers_mut();
        for (name, value) in [
            (ACCESS_ID_HEADER, self.access_id.as_str()),
            (ACCESS_TIME_HEADER, access_time.as_str()),
            (ACCESS_SIGNATURE_HEADER, signature.as_str()),
        ] {
            let header_value =
                HeaderValue::from_str(value).map_err(|e| Error::Other(e.into()))?;
            headers.insert(name, header_value);
        }

        next.run(req, extensions).await
    }
}
