use base64::{engine::general_purpose::STANDARD, Engine};
use openssl::{
    ec::{EcGroup, EcKey},
    ecdsa::EcdsaSig,
    nid::Nid,
    pkey::Private,
    sha::sha256,
};
use reqwest::Url;
use serde_json::json;
use starkbank_rust::{
    client::Environment, credential::Credential, key_cache::KeyCache, signature::PublicKey,
    StarkClient,
};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Key pair standing in for the one Stark Bank signs webhooks with.
pub struct StarkKey {
    private_key: EcKey<Private>,
}

impl StarkKey {
    pub fn generate() -> Self {
        Self {
            private_key: EcKey::generate(&EcGroup::from_curve_name(Nid::SECP256K1).unwrap())
                .unwrap(),
        }
    }

    pub fn public_pem(&self) -> String {
        String::from_utf8(self.private_key.public_key_to_pem().unwrap()).unwrap()
    }

    /// Base64 DER signature over `content`, as sent in the `Digital-Signature` header.
    pub fn sign(&self, content: &str) -> String {
        let sig = EcdsaSig::sign(&sha256(content.as_bytes()), &self.private_key).unwrap();
        STANDARD.encode(sig.to_der().unwrap())
    }
}

pub struct TestContext {
    pub client: StarkClient,
    pub key_cache: Arc<KeyCache>,
    pub project_id: String,
    pub project_public_key: PublicKey,
    pub stark_key: StarkKey,
    pub mock_server: MockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        // Generate a new random project for this specific test
        let project_id = Uuid::new_v4().to_string();
        let project_key = EcKey::generate(&EcGroup::from_curve_name(Nid::SECP256K1).unwrap())
            .unwrap();

        let mock_server = MockServer::start().await;
        let environment = Environment::from_single_url(&Url::parse(&mock_server.uri()).unwrap());

        let credential = Credential::project(
            &project_id,
            String::from_utf8(project_key.private_key_to_pem().unwrap()).unwrap(),
            environment,
        )
        .unwrap();

        let project_public_key = PublicKey::from_pem(&credential.public_key_pem().unwrap()).unwrap();

        // Share the cache with the test so it can be inspected and primed
        let key_cache = Arc::new(KeyCache::new());
        let client = StarkClient::builder(credential)
            .with_key_cache(key_cache.clone())
            .build()
            .unwrap();

        Self {
            client,
            key_cache,
            project_id,
            project_public_key,
            stark_key: StarkKey::generate(),
            mock_server,
        }
    }

    /// Serves `pem` as the current Stark Bank public key, expecting exactly `calls` fetches.
    pub async fn serve_public_key(&self, pem: &str, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/v2/public-key"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cursor": null,
                "publicKeys": [{
                    "id": "5190312591556608",
                    "content": pem,
                    "created": "2023-01-01T00:00:00.000000+00:00"
                }]
            })))
            .expect(calls)
            .mount(&self.mock_server)
            .await;
    }

    /// Serves the key of [`stark_key`](TestContext::stark_key).
    pub async fn serve_stark_key(&self, calls: u64) {
        let pem = self.stark_key.public_pem();
        self.serve_public_key(&pem, calls).await;
    }
}
