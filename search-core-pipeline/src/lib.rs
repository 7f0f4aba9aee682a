//! # Search Core Pipeline
//!
//! Indexing pipeline of the search core: table definitions are turned into
//! entity schemas, visible records are read page by page from the host's
//! record store, relations are resolved to labels, records are normalized
//! into documents and handed to the connection sink.
//!
//! ## Architecture
//!
//! 1. **Schema**: derives and caches per entity type metadata
//! 2. **Source**: builds visibility restricted selects against the store
//! 3. **Processor**: resolves relations and normalizes records
//! 4. **Indexer**: drives full and single record runs

pub mod errors;
pub mod indexer;
pub mod processor;
pub mod schema;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::IndexingError;
pub use indexer::{IndexRunReport, Indexer, IndexerConfig, IndexingState, RecordOutcome};
pub use processor::{normalize, ProcessedBatch, RecordProcessor, RelationResolver};
pub use schema::{EntitySchema, RegistryConfig, SchemaRegistry, TableDefinition};
pub use source::RecordSource;
