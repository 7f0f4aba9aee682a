//! Query factory.
//!
//! Translates a [`SearchRequest`] into the query document understood by the
//! search engine:
//!
//! ```text
//! {
//!   "query": { "bool": { "must": [...], "filter": [...] } },
//!   "aggs": { "<facet id>": { "terms": { "field": "<field>" } } }
//! }
//! ```

use serde_json::{json, Map, Value};
use tracing::debug;

use super::QueryDocument;
use search_core_shared::{Facet, SearchRequest};

/// Default catch-all field the search term is matched against.
pub const DEFAULT_CATCH_ALL_FIELD: &str = "_all";

/// Builds query documents from search requests.
///
/// The factory holds no per-request state: every call to [`build`](Self::build)
/// starts from an empty document.
#[derive(Debug, Clone)]
pub struct QueryFactory {
    catch_all_field: String,
}

impl Default for QueryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryFactory {
    /// Create a factory matching terms against `_all`.
    pub fn new() -> Self {
        Self {
            catch_all_field: DEFAULT_CATCH_ALL_FIELD.to_string(),
        }
    }

    /// Create a factory matching terms against a custom catch-all field.
    pub fn with_catch_all_field(field: impl Into<String>) -> Self {
        Self {
            catch_all_field: field.into(),
        }
    }

    /// Build the query document for `request`.
    ///
    /// Fragments are merged in a fixed order: search term, filters, facets.
    /// Later fragments only extend earlier ones.
    pub fn build(&self, request: &SearchRequest) -> QueryDocument {
        let mut query = QueryDocument::new().merge(self.search_fragment(request.term()));

        if let Some(filter) = Self::filter_fragment(request.filters()) {
            query = query.merge(filter);
        }

        for facet in request.facets() {
            query = query.merge(Self::facet_fragment(facet));
        }

        debug!(query = %query.to_value(), "Generated search query");
        query
    }

    /// Full-text match of the term against the catch-all field.
    pub fn search_fragment(&self, term: &str) -> Value {
        let mut matcher = Map::new();
        matcher.insert(self.catch_all_field.clone(), Value::from(term));

        json!({
            "query": {
                "bool": {
                    "must": [
                        { "match": matcher }
                    ]
                }
            }
        })
    }

    /// One exact term per filter in the non-scoring filter context.
    ///
    /// Returns `None` when there is nothing to filter on.
    pub fn filter_fragment<'a, I>(filters: I) -> Option<Value>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let terms: Vec<Value> = filters
            .into_iter()
            .map(|(name, value)| {
                let mut term = Map::new();
                term.insert(name.clone(), value.clone());
                json!({ "term": term })
            })
            .collect();

        if terms.is_empty() {
            return None;
        }

        Some(json!({
            "query": {
                "bool": {
                    "filter": terms
                }
            }
        }))
    }

    /// Terms aggregation keyed by the facet identifier.
    pub fn facet_fragment(facet: &Facet) -> Value {
        let mut aggregation = Map::new();
        aggregation.insert(
            facet.identifier.clone(),
            json!({
                "terms": {
                    "field": facet.field
                }
            }),
        );

        json!({ "aggs": aggregation })
    }
}
