//! Parsing of authenticated inbound payloads such as webhook events.

use crate::{resource::Resource, signature::SignatureVerifier, Error};
use anyhow::anyhow;
use serde_json::Value;

/// Turns a signed JSON payload pushed by Stark Bank into a typed resource.
#[derive(Clone, Debug)]
pub struct EventParser {
    verifier: SignatureVerifier,
}

impl EventParser {
    pub(crate) fn new(verifier: SignatureVerifier) -> Self {
        Self { verifier }
    }

    /// Verifies `signature` over the raw `content` and decodes it as `R`.
    ///
    /// When `envelope_key` is given, the resource is read from that top level key
    /// (e.g. `{"event": {...}}`). The signature always covers `content` exactly as
    /// received: callers must not re-serialize the body before handing it over.
    ///
    /// Fails with [`Error::InvalidSignature`](crate::Error::InvalidSignature) if the
    /// signature does not verify, even after refreshing the public key.
    #[tracing::instrument(name = "Parse Signed Content", skip(self, content, signature), fields(resource = R::NAME))]
    pub async fn parse_and_verify<R: Resource>(
        &self,
        content: &str,
        signature: &str,
        envelope_key: Option<&str>,
    ) -> Result<R, Error> {
        let mut value: Value = serde_json::from_str(content)?;

        if let Some(key) = envelope_key {
            value = value
                .get_mut(key)
                .map(Value::take)
                .ok_or_else(|| Error::Other(anyhow!("Missing `{}` in signed content", key)))?;
        }

        self.verifier
            .verify_or_fail(content.as_bytes(), signature)
            .await?;

        R::decode(value)
    }
}
