use crate::resource::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public key as listed by the `public-key` endpoint.
///
/// `content` holds the PEM text, parse it with
/// [`PublicKey::from_pem`](crate::signature::PublicKey::from_pem).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Resource for PublicKeyRecord {
    const NAME: &'static str = "PublicKey";
}
