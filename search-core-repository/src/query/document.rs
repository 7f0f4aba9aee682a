//! Query document and fragment merging.

use serde::Serialize;
use serde_json::{Map, Value};

/// Deep-merge `fragment` into `base`.
///
/// - objects merge key by key, keeping the position of keys already in `base`
///   and appending new keys in fragment order
/// - arrays on both sides are concatenated
/// - any other combination takes the fragment's value
pub fn merge_fragments(base: Value, fragment: Value) -> Value {
    match (base, fragment) {
        (Value::Object(mut base), Value::Object(fragment)) => {
            for (key, value) in fragment {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::take(existing);
                        *existing = merge_fragments(current, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (Value::Array(mut base), Value::Array(fragment)) => {
            base.extend(fragment);
            Value::Array(base)
        }
        (_, fragment) => fragment,
    }
}

/// A query for the search engine, built up from merged fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryDocument(Map<String, Value>);

impl QueryDocument {
    /// An empty query document.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Return this document with `fragment` deep-merged into it.
    ///
    /// Fragments that are not JSON objects are ignored.
    pub fn merge(self, fragment: Value) -> Self {
        if !fragment.is_object() {
            return self;
        }
        match merge_fragments(Value::Object(self.0), fragment) {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Identifiers of the requested aggregations, in request order.
    pub fn aggregation_keys(&self) -> Vec<String> {
        self.0
            .get("aggs")
            .and_then(Value::as_object)
            .map(|aggs| aggs.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for QueryDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
