//! Record and document types.
//!
//! A [`RawRecord`] is a row as read from the host store. A
//! [`NormalizedDocument`] is what the search sink receives: the same fields
//! plus the reserved `search_identifier` and `search_title`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier column present on every record.
pub const UID_FIELD: &str = "uid";

/// Container (parent) reference column present on every record.
pub const PID_FIELD: &str = "pid";

/// Reserved document field holding the stable document identifier.
pub const SEARCH_IDENTIFIER_FIELD: &str = "search_identifier";

/// Reserved document field holding the display title.
pub const SEARCH_TITLE_FIELD: &str = "search_title";

/// Interpret a raw value as an integer.
///
/// Stores frequently hand back numeric columns as strings, so numeric
/// strings are accepted as well.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a scalar value as a string. Returns `None` for null, arrays and objects.
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A single row fetched from the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Return the record with `field` set to `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The record's unique identifier, if present and numeric.
    pub fn uid(&self) -> Option<i64> {
        self.get(UID_FIELD).and_then(value_as_i64)
    }

    /// The record's container reference, if present and numeric.
    pub fn pid(&self) -> Option<i64> {
        self.get(PID_FIELD).and_then(value_as_i64)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<NormalizedDocument> for RawRecord {
    fn from(document: NormalizedDocument) -> Self {
        Self(document.0)
    }
}

/// The canonical document shape handed to the search sink.
///
/// Documents produced by the normalizer always carry `search_identifier`
/// and, when the label field had a value, `search_title`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDocument(Map<String, Value>);

impl NormalizedDocument {
    /// Wrap an already normalized field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The document identifier used as the search engine document id.
    pub fn identifier(&self) -> Option<String> {
        self.0.get(SEARCH_IDENTIFIER_FIELD).and_then(value_as_string)
    }

    pub fn title(&self) -> Option<&Value> {
        self.0.get(SEARCH_TITLE_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}
