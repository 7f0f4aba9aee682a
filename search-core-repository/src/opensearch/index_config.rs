//! OpenSearch index naming, settings and mappings.

use serde_json::{json, Value};

use search_core_shared::{SEARCH_IDENTIFIER_FIELD, SEARCH_TITLE_FIELD};

/// Default prefix for entity type indexes.
pub const DEFAULT_INDEX_PREFIX: &str = "search-core";

/// Naming and shape of the per entity type indexes.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Prefix shared by all entity type indexes.
    pub prefix: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_PREFIX)
    }
}

impl IndexConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }

    /// Index holding the documents of `entity_type`.
    ///
    /// Index names must be lowercase in OpenSearch.
    pub fn index_name(&self, entity_type: &str) -> String {
        format!("{}-{}", self.prefix, entity_type).to_lowercase()
    }

    /// Pattern matching every entity type index, used for searches.
    pub fn search_pattern(&self) -> String {
        format!("{}-*", self.prefix).to_lowercase()
    }

    /// Recover the entity type from an index name.
    pub fn entity_type_for_index<'a>(&self, index: &'a str) -> Option<&'a str> {
        let prefix = format!("{}-", self.prefix.to_lowercase());
        index.strip_prefix(prefix.as_str())
    }

    /// Settings and mappings used when creating an entity type index.
    ///
    /// Only the reserved document fields are mapped explicitly; all other
    /// record fields are mapped dynamically.
    pub fn index_settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            },
            "mappings": {
                "properties": {
                    SEARCH_IDENTIFIER_FIELD: {
                        "type": "keyword"
                    },
                    SEARCH_TITLE_FIELD: {
                        "type": "text",
                        "fields": {
                            "raw": {
                                "type": "keyword"
                            }
                        }
                    }
                }
            }
        })
    }
}
