//! Search request and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A requested aggregation bucket over a document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// Key under which the aggregation is returned.
    pub identifier: String,
    /// Document field the aggregation runs over.
    pub field: String,
}

impl Facet {
    pub fn new(identifier: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            field: field.into(),
        }
    }
}

/// An application-level search request.
///
/// Filters are unordered (stored sorted by name); facets keep the order in
/// which they were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    term: String,
    #[serde(default)]
    filters: BTreeMap<String, Value>,
    #[serde(default)]
    facets: Vec<Facet>,
}

impl SearchRequest {
    /// Create a request for the given free-text term.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filters: BTreeMap::new(),
            facets: Vec::new(),
        }
    }

    /// Add an exact-term filter.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Request a facet. Facets are returned in the order they were added.
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.push(facet);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    pub fn has_filter(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Entity type the hit was indexed under.
    pub entity_type: String,
    /// The hit's document identifier.
    pub identifier: String,
    /// Relevance score reported by the engine.
    pub score: f64,
    /// The stored document.
    pub data: Map<String, Value>,
}

impl ResultItem {
    /// All stored fields of the hit.
    pub fn plain_data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// One bucket of a terms aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub key: String,
    pub count: u64,
}

/// Aggregation result for one requested facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    pub identifier: String,
    pub buckets: Vec<FacetBucket>,
}

/// Result set of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matching documents.
    pub total: u64,
    /// Returned hits, ordered by relevance.
    pub items: Vec<ResultItem>,
    /// Facet results in request order.
    pub facets: Vec<FacetResult>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}
