//! # Search Core Repository
//!
//! This crate provides the seams between the search core and the outside
//! world: the record store the indexer reads from, the search index provider
//! documents are written to, the connection sink that wraps every write in a
//! refresh, and the query factory translating search requests into query
//! documents. A concrete provider for OpenSearch is included.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod query;
pub mod service;
pub mod types;

pub use config::{SinkConfig, DEFAULT_MAX_BATCH_SIZE};
pub use errors::SinkError;
pub use interfaces::{RecordStore, SearchIndexProvider};
pub use opensearch::OpenSearchProvider;
pub use query::{merge_fragments, QueryDocument, QueryFactory};
pub use service::ConnectionSink;
pub use types::{BatchOperationResult, BatchOperationSummary, PageLimit, RecordQuery};
