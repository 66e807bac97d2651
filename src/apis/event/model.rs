use crate::{
    resource::{encode_entity, Entity, Resource},
    Error,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Notification pushed to a webhook whenever a subscribed resource changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: Option<bool>,
    /// Subscription that triggered the event, e.g. `invoice` or `transfer`.
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Log of the resource change. Its shape depends on `subscription`.
    #[serde(default)]
    pub log: Option<Value>,
}

impl Event {
    /// Decodes the attached log as `T`, e.g. an invoice log for an `invoice` subscription.
    pub fn log_as<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        self.log
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(Error::from)
    }
}

impl Resource for Event {
    const NAME: &'static str = "Event";
}

/// Body of an event update.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub is_delivered: bool,
}

impl Entity for EventUpdate {
    fn to_json(&self) -> Result<Value, Error> {
        encode_entity(self)
    }
}

/// Change log of an invoice, as carried by events of the `invoice` subscription.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLog {
    pub id: String,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub invoice: crate::apis::invoice::Invoice,
}
