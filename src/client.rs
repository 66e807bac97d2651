//! Module containing the main Stark Bank API client.

use crate::{
    apis::{
        event::EventsApi, invoice::InvoicesApi, public_key::PublicKeysApi,
        request::RequestsApi, StarkClientInner,
    },
    common::{API_VERSION, DEFAULT_LANGUAGE, DEFAULT_PRODUCTION_URL, DEFAULT_SANDBOX_URL},
    credential::Credential,
    key_cache::KeyCache,
    middlewares::{
        error_handling::ErrorHandlingMiddleware, inject_headers::InjectHeadersMiddleware,
        signing::SigningMiddleware,
    },
    parser::EventParser,
    rest::RestClient,
    signature::SignatureVerifier,
    Error,
};
use reqwest::Url;
use reqwest_tracing::TracingMiddleware;
use std::sync::Arc;

/// Client for Stark Bank public APIs.
///
/// Cloning a `StarkClient` is cheap: all the clones share the same HTTP client
/// and the same public key cache.
#[derive(Debug, Clone)]
pub struct StarkClient {
    /// Generic REST engine, usable with any type implementing [`Resource`](crate::resource::Resource).
    pub rest: RestClient,
    /// Verifier for digital signatures attached to inbound content.
    pub verifier: SignatureVerifier,
    /// Parser for authenticated inbound payloads.
    pub parser: EventParser,
    /// Webhook events APIs client.
    pub events: EventsApi,
    /// Invoices APIs client.
    pub invoices: InvoicesApi,
    /// Public keys APIs client.
    pub public_keys: PublicKeysApi,
    /// Untyped passthrough client for endpoints without a dedicated wrapper.
    pub requests: RequestsApi,
}

impl StarkClient {
    /// Builds a new [`StarkClient`](crate::client::StarkClient) with the default configuration.
    pub fn new(credential: Credential) -> Result<StarkClient, Error> {
        StarkClientBuilder::new(credential).build()
    }

    /// Returns a new builder to configure a new [`StarkClient`](crate::client::StarkClient).
    pub fn builder(credential: Credential) -> StarkClientBuilder {
        StarkClientBuilder::new(credential)
    }
}

/// Builder for a [`StarkClient`](crate::client::StarkClient).
#[derive(Debug)]
pub struct StarkClientBuilder {
    client: reqwest::Client,
    credential: Credential,
    environment: Option<Environment>,
    language: String,
    key_cache: Option<Arc<KeyCache>>,
}

impl StarkClientBuilder {
    /// Creates a new builder to configure a [`StarkClient`](crate::client::StarkClient).
    pub fn new(credential: Credential) -> Self {
        Self {
            client: reqwest::Client::new(),
            credential,
            environment: None,
            language: DEFAULT_LANGUAGE.to_string(),
            key_cache: None,
        }
    }

    /// Consumes the builder and builds a new [`StarkClient`](crate::client::StarkClient).
    pub fn build(self) -> Result<StarkClient, Error> {
        let environment = self
            .environment
            .unwrap_or_else(|| self.credential.environment().clone());
        let api_url = environment.api_url()?;

        let signing_middleware = SigningMiddleware::new(&self.credential)?;
        let client = reqwest_middleware::ClientBuilder::new(self.client)
            .with(TracingMiddleware::default())
            .with(ErrorHandlingMiddleware)
            .with(InjectHeadersMiddleware::new(&self.language)?)
            .with(signing_middleware)
            .build();

        let inner = Arc::new(StarkClientInner {
            client,
            environment,
            api_url,
        });

        let rest = RestClient::new(inner);
        let verifier = SignatureVerifier::new(rest.clone(), self.key_cache.unwrap_or_default());
        let parser = EventParser::new(verifier.clone());

        Ok(StarkClient {
            events: EventsApi::new(rest.clone(), parser.clone()),
            invoices: InvoicesApi::new(rest.clone()),
            public_keys: PublicKeysApi::new(rest.clone()),
            requests: RequestsApi::new(rest.clone()),
            rest,
            verifier,
            parser,
        })
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    ///
    /// Timeouts, proxies and TLS settings are configured on this client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the environment carried by the credential.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the `Accept-Language` sent to the API. Error messages are localized accordingly.
    ///
    /// Defaults to `en-US`.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Shares an existing public key cache with this client.
    ///
    /// By default every client starts with its own empty cache.
    pub fn with_key_cache(mut self, key_cache: Arc<KeyCache>) -> Self {
        self.key_cache = Some(key_cache);
        self
    }
}

/// Stark Bank environment to connect to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Live environment, moving real money.
    Production,
    /// Sandbox environment, used for integration tests.
    Sandbox,
    /// Custom API host, mostly useful to point the client at a mock server.
    Custom { api_url: Url },
}

impl Environment {
    /// Builds a custom environment pointing at the given host.
    pub fn from_single_url(url: &Url) -> Environment {
        Environment::Custom {
            api_url: url.clone(),
        }
    }

    /// Versioned base URL every endpoint path is resolved against.
    pub fn api_url(&self) -> Result<Url, Error> {
        let host = match self {
            Environment::Production => Url::parse(DEFAULT_PRODUCTION_URL),
            Environment::Sandbox => Url::parse(DEFAULT_SANDBOX_URL),
            Environment::Custom { api_url } => Ok(api_url.clone()),
        }
        .map_err(|e| Error::Other(e.into()))?;

        host.join(&format!("{}/", API_VERSION))
            .map_err(|e| Error::Other(e.into()))
    }
}
