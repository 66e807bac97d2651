//! ECDSA primitives and verification of digital signatures attached to inbound content.
//!
//! Stark Bank signs webhook bodies and authorization requests with its current private key
//! and sends the base64 encoded DER signature in the `Digital-Signature` header. The key is
//! rotated from time to time, so verification first tries the cached public key and, if that
//! fails, fetches the most recent one exactly once before giving up.

use crate::{
    apis::public_key::PublicKeyRecord, key_cache::KeyCache, query::Query, rest::RestClient,
    Error,
};
use anyhow::anyhow;
use base64::{engine::general_purpose::STANDARD, Engine};
use openssl::{
    ec::{EcKey, EcKeyRef},
    ecdsa::EcdsaSig,
    pkey::{Private, Public},
    sha::sha256,
};
use std::{fmt, sync::Arc};

/// ECDSA public key used to verify content signed by Stark Bank.
#[derive(Clone)]
pub struct PublicKey {
    key: EcKey<Public>,
}

impl PublicKey {
    /// Parses a PEM encoded (`BEGIN PUBLIC KEY`) EC public key.
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        Ok(Self {
            key: EcKey::public_key_from_pem(pem.as_bytes())?,
        })
    }

    /// Encodes this key back to PEM.
    pub fn to_pem(&self) -> Result<String, Error> {
        String::from_utf8(self.key.public_key_to_pem()?).map_err(|e| Error::Other(e.into()))
    }

    /// Returns `true` if `signature` was produced over `content` by the matching private key.
    pub fn verify(&self, content: &[u8], signature: &Signature) -> bool {
        verify_digest(content, signature, &self.key)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey").finish_non_exhaustive()
    }
}

/// Decoded ECDSA signature.
pub struct Signature {
    sig: EcdsaSig,
}

impl Signature {
    /// Decodes a base64 encoded DER signature.
    ///
    /// Anything that is not valid base64 or not a valid DER signature is rejected
    /// with [`Error::InvalidSignature`](crate::Error::InvalidSignature).
    pub fn from_base64(signature: &str) -> Result<Self, Error> {
        let der = STANDARD
            .decode(signature.trim())
            .map_err(|_| Error::InvalidSignature)?;
        let sig = EcdsaSig::from_der(&der).map_err(|_| Error::InvalidSignature)?;

        Ok(Self { sig })
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature").finish_non_exhaustive()
    }
}

/// Signs `message` with SHA-256 + ECDSA and returns the base64 encoded DER signature.
pub(crate) fn sign(message: &[u8], private_key: &EcKeyRef<Private>) -> Result<String, Error> {
    let sig = EcdsaSig::sign(&sha256(message), private_key)?;
    Ok(STANDARD.encode(sig.to_der()?))
}

fn verify_digest(content: &[u8], signature: &Signature, key: &EcKeyRef<Public>) -> bool {
    signature
        .sig
        .verify(&sha256(content), key)
        .unwrap_or(false)
}

/// Verifier of digital signatures, backed by a [`KeyCache`](crate::key_cache::KeyCache).
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    rest: RestClient,
    key_cache: Arc<KeyCache>,
}

impl SignatureVerifier {
    pub(crate) fn new(rest: RestClient, key_cache: Arc<KeyCache>) -> Self {
        Self { rest, key_cache }
    }

    /// The cache this verifier reads from and refreshes.
    pub fn key_cache(&self) -> &Arc<KeyCache> {
        &self.key_cache
    }

    /// Checks that `content` was signed by Stark Bank.
    ///
    /// Returns `Ok(false)` if neither the cached key nor a freshly fetched one validate
    /// the signature. A malformed `signature` fails with
    /// [`Error::InvalidSignature`](crate::Error::InvalidSignature) before any request is sent.
    ///
    /// A rotated key and a forged signature are indistinguishable here: both cost one refresh.
    #[tracing::instrument(name = "Verify Digital Signature", skip_all)]
    pub async fn verify(&self, content: &[u8], signature: &str) -> Result<bool, Error> {
        let signature = Signature::from_base64(signature)?;

        match self.key_cache.get() {
            Some(key) if key.verify(content, &signature) => {
                tracing::debug!("Signature verified with the cached public key");
                return Ok(true);
            }
            Some(_) => {
                tracing::debug!("Cached public key rejected the signature, refreshing it")
            }
            None => tracing::debug!("No public key cached yet"),
        }

        let key = self.fetch_public_key().await?;
        Ok(key.verify(content, &signature))
    }

    /// Same as [`verify`](SignatureVerifier::verify), but turns a failed verification into
    /// [`Error::InvalidSignature`](crate::Error::InvalidSignature).
    pub async fn verify_or_fail(&self, content: &[u8], signature: &str) -> Result<(), Error> {
        if self.verify(content, signature).await? {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// Fetches the most recent Stark Bank public key and stores it in the cache.
    #[tracing::instrument(name = "Fetch Public Key", skip(self))]
    pub async fn fetch_public_key(&self) -> Result<Arc<PublicKey>, Error> {
        let page = self
            .rest
            .get_page::<PublicKeyRecord>(&Query::new().limit(1))
            .await?;
        let record = page
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::Other(anyhow!("Stark Bank returned no public key")))?;

        let key = Arc::new(PublicKey::from_pem(&record.content)?);
        self.key_cache.set(key.clone());
        tracing::info!("Got new public key");

        Ok(key)
    }
}
