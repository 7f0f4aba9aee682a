//! # Search Core Shared
//!
//! Shared types used across the search core crates: the records read from the
//! host store, the normalized documents handed to the search sink, search
//! requests and responses, and the configuration container seam.

pub mod configuration;
pub mod record;
pub mod search;

pub use configuration::{ConfigurationContainer, ConfigurationError, MapConfiguration};
pub use record::{
    value_as_i64, value_as_string, NormalizedDocument, RawRecord, PID_FIELD,
    SEARCH_IDENTIFIER_FIELD, SEARCH_TITLE_FIELD, UID_FIELD,
};
pub use search::{
    Facet, FacetBucket, FacetResult, ResultItem, SearchRequest, SearchResponse,
};
