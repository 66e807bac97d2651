use crate::{
    resource::{encode_entity, Entity, Resource},
    Error,
};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamic charge payable through a Pix BR Code.
///
/// Server-assigned fields (`id`, `status`, `brcode`, ...) are skipped by the builder and
/// never sent on creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Amount in cents.
    pub amount: i64,
    #[builder(setter(into))]
    pub tax_id: String,
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    /// Seconds after `due` before the invoice expires.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    /// Percentage charged once after `due`.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
    /// Monthly percentage charged after `due`.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<f64>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<Discount>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<Description>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brcode: Option<String>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_amount: Option<i64>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[builder(setter(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Resource for Invoice {
    const NAME: &'static str = "Invoice";
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Discount {
    pub percentage: f64,
    pub due: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Partial update of an invoice. Fields left to `None` are not changed.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct InvoiceUpdate {
    #[builder(setter(into, strip_option))]
    pub status: Option<String>,
    #[builder(setter(strip_option))]
    pub amount: Option<i64>,
    #[builder(setter(strip_option))]
    pub due: Option<DateTime<Utc>>,
    #[builder(setter(strip_option))]
    pub expiration: Option<i64>,
}

impl Entity for InvoiceUpdate {
    fn to_json(&self) -> Result<Value, Error> {
        encode_entity(self)
    }
}

/// Payer information of a paid invoice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    pub amount: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub end_to_end_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl Resource for InvoicePayment {
    const NAME: &'static str = "Payment";
}
