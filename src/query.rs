//! Filters sent as URL query parameters on list requests.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Value of a single query filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    String(String),
    List(Vec<String>),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Int(i64),
    Bool(bool),
}

impl QueryValue {
    /// Wire representation of this value, or `None` if it should not be sent at all.
    fn to_param(&self) -> Option<String> {
        match self {
            QueryValue::String(s) => Some(s.clone()),
            QueryValue::List(items) if items.is_empty() => None,
            QueryValue::List(items) => Some(items.join(",")),
            QueryValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            QueryValue::DateTime(datetime) => Some(datetime.to_rfc3339()),
            QueryValue::Int(i) => Some(i.to_string()),
            QueryValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(items: Vec<String>) -> Self {
        QueryValue::List(items)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(items: &[&str]) -> Self {
        QueryValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(date: NaiveDate) -> Self {
        QueryValue::Date(date)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(datetime: DateTime<Utc>) -> Self {
        QueryValue::DateTime(datetime)
    }
}

impl From<i64> for QueryValue {
    fn from(i: i64) -> Self {
        QueryValue::Int(i)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

/// Set of filters for a list request.
///
/// `limit` and `cursor` drive pagination and are kept apart from the other filters.
/// Filters set to `None` are never sent.
///
/// ```rust
/// # use starkbank_rust::query::Query;
/// # use chrono::NaiveDate;
/// let query = Query::new()
///     .limit(10)
///     .after(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
///     .set("status", "paid")
///     .set_opt("tags", None::<Vec<String>>);
///
/// assert_eq!(query.get_limit(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub(crate) limit: Option<usize>,
    pub(crate) cursor: Option<String>,
    filters: BTreeMap<String, QueryValue>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of items to fetch.
    ///
    /// For a single page this is the page size, for a lazy list it bounds the total.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continuation token returned by a previous page.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Sets the continuation token, or clears it with `None`.
    pub fn cursor_opt(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Only items created after this date.
    pub fn after(self, date: NaiveDate) -> Self {
        self.set("after", date)
    }

    /// Only items created before this date.
    pub fn before(self, date: NaiveDate) -> Self {
        self.set("before", date)
    }

    /// Only items with at least one of these tags.
    pub fn tags(self, tags: Vec<String>) -> Self {
        self.set("tags", tags)
    }

    /// Only items with these ids.
    pub fn ids(self, ids: Vec<String>) -> Self {
        self.set("ids", ids)
    }

    /// Sets an arbitrary filter.
    pub fn set(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.filters.insert(key.to_string(), value.into());
        self
    }

    /// Sets an arbitrary filter, or removes it if `value` is `None`.
    pub fn set_opt<V: Into<QueryValue>>(mut self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => {
                self.filters.insert(key.to_string(), value.into());
            }
            None => {
                self.filters.remove(key);
            }
        }
        self
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// URL query pairs for this query, in a stable order.
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .filter_map(|(k, v)| v.to_param().map(|v| (k.clone(), v)))
            .collect();

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor".to_string(), cursor.clone()));
        }

        pairs
    }
}
