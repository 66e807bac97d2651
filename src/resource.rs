//! Contract between the REST engine and the types it reads and writes.

use crate::Error;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A remote collection the [`RestClient`](crate::rest::RestClient) knows how to talk to.
///
/// `NAME` is the CamelCase resource identifier used by the API (e.g. `"PublicKey"`);
/// the endpoint path and the JSON envelope keys are derived from it.
/// Decoding and encoding default to serde, which is all the resources in this crate need.
///
/// ```rust
/// # use starkbank_rust::resource::Resource;
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct BrcodePayment {
///     id: Option<String>,
///     brcode: String,
/// }
///
/// impl Resource for BrcodePayment {
///     const NAME: &'static str = "BrcodePayment";
/// }
///
/// assert_eq!(BrcodePayment::endpoint(), "brcode-payment");
/// assert_eq!(BrcodePayment::json_key(), "brcodePayment");
/// assert_eq!(BrcodePayment::json_key_plural(), "brcodePayments");
/// ```
pub trait Resource: Serialize + DeserializeOwned + Send + 'static {
    const NAME: &'static str;

    /// Path segment of the collection, e.g. `public-key`.
    fn endpoint() -> String {
        api_endpoint(Self::NAME)
    }

    /// JSON key wrapping a single item, e.g. `publicKey`.
    fn json_key() -> String {
        last_name(Self::NAME)
    }

    /// JSON key wrapping a list of items, e.g. `publicKeys`.
    fn json_key_plural() -> String {
        last_name_plural(Self::NAME)
    }

    /// Converts decoded JSON into a typed item.
    fn decode(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Converts a typed item into JSON ready to be sent.
    fn encode(&self) -> Result<Value, Error> {
        encode_entity(self)
    }
}

/// Serializes any entity, typed or a raw JSON map, dropping its own `null` fields.
///
/// Nested values are sent as they are, so opaque payloads survive an encode/decode cycle.
pub fn encode_entity<E: Serialize + ?Sized>(entity: &E) -> Result<Value, Error> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(map) = &mut value {
        map.retain(|_, v| !v.is_null());
    }
    Ok(value)
}

/// Request body the [`RestClient`](crate::rest::RestClient) can send.
///
/// Resources are encoded through their own [`Resource::encode`], raw JSON maps through
/// [`encode_entity`].
pub trait Entity {
    fn to_json(&self) -> Result<Value, Error>;
}

impl<R: Resource> Entity for R {
    fn to_json(&self) -> Result<Value, Error> {
        self.encode()
    }
}

impl Entity for Value {
    fn to_json(&self) -> Result<Value, Error> {
        encode_entity(self)
    }
}

/// `BrcodePayment` -> `brcode-payment`
pub fn api_endpoint(name: &str) -> String {
    let mut endpoint = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                endpoint.push('-');
            }
            endpoint.extend(c.to_lowercase());
        } else {
            endpoint.push(c);
        }
    }
    endpoint
}

/// `BrcodePayment` -> `brcodePayment`
pub fn last_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `BrcodePayment` -> `brcodePayments`, `Policy` -> `policies`
pub fn last_name_plural(name: &str) -> String {
    let base = last_name(name);
    if base.ends_with('s') {
        base
    } else if base.ends_with("ey") {
        base + "s"
    } else if let Some(stem) = base.strip_suffix('y') {
        format!("{}ies", stem)
    } else {
        base + "s"
    }
}
