//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SinkError;
use crate::query::QueryDocument;
use crate::types::BatchOperationSummary;
use search_core_shared::{NormalizedDocument, SearchResponse};

/// Abstracts the underlying search index implementation.
///
/// Documents are grouped by entity type; each entity type maps to its own
/// index in the backend. Implementations are injected into
/// [`ConnectionSink`](crate::ConnectionSink), which adds the
/// refresh-after-write guarantee on top of these primitives.
///
/// All methods return `Result<T, SinkError>` for consistent error handling across
/// different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Make sure the index for `entity_type` exists, creating it if necessary.
    async fn ensure_index(&self, entity_type: &str) -> Result<(), SinkError>;

    /// Index a single document.
    ///
    /// If a document with the same identifier already exists, it will be replaced.
    async fn index_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError>;

    /// Index multiple documents in bulk.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Aggregate statistics and individual results
    /// * `Err(SinkError)` - If the bulk request fails entirely
    async fn bulk_index_documents(
        &self,
        entity_type: &str,
        documents: &[NormalizedDocument],
    ) -> Result<BatchOperationSummary, SinkError>;

    /// Update an existing document, creating it if it doesn't exist.
    async fn update_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError>;

    /// Delete a document by identifier.
    ///
    /// If the document doesn't exist, the operation is considered successful.
    async fn delete_document(&self, entity_type: &str, identifier: &str) -> Result<(), SinkError>;

    /// Make all writes to the entity type's index visible to searches.
    async fn refresh(&self, entity_type: &str) -> Result<(), SinkError>;

    /// Execute a query document across all entity type indexes.
    async fn search(&self, query: &QueryDocument) -> Result<SearchResponse, SinkError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SinkError>;
}
