//! Query parameters for list endpoints

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Largest page the API will return
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Value of one query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
    Date(NaiveDate),
}

impl QueryValue {
    /// Wire representation; lists are comma-joined
    pub fn to_wire(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(","),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Query parameters, keyed by their wire name.
///
/// Absent keys are omitted from the request. `limit` on a single page must be
/// 1-100; the streaming query treats it as a total across pages instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, QueryValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter
    pub fn param(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<QueryValue>) {
        self.params.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.params.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    pub fn after(self, date: NaiveDate) -> Self {
        self.param("after", date)
    }

    pub fn before(self, date: NaiveDate) -> Self {
        self.param("before", date)
    }

    pub fn status(self, status: &str) -> Self {
        self.param("status", status)
    }

    pub fn tags(self, tags: Vec<String>) -> Self {
        self.param("tags", tags)
    }

    pub fn ids(self, ids: Vec<String>) -> Self {
        self.param("ids", ids)
    }

    pub fn cursor(self, cursor: &str) -> Self {
        self.param("cursor", cursor)
    }

    /// The `limit` parameter, if it is a non-negative integer
    pub fn get_limit(&self) -> Option<u64> {
        match self.params.get("limit") {
            Some(QueryValue::Int(n)) => u64::try_from(*n).ok(),
            Some(QueryValue::Str(s)) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_cursor(&self) -> Option<&str> {
        match self.params.get("cursor") {
            Some(QueryValue::Str(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `(key, value)` pairs in wire form, sorted by key. Empty lists are skipped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(_, value)| !matches!(value, QueryValue::List(items) if items.is_empty()))
            .map(|(key, value)| (key.clone(), value.to_wire()))
            .collect()
    }
}
