//! Connection sink.
//!
//! The application-facing side of the search index. Every mutation runs
//! inside a scope bound to one entity type's index: the index is acquired
//! (created if missing), the mutation runs, and the index is refreshed
//! before the call returns, whether or not the mutation succeeded.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::SinkConfig;
use crate::errors::SinkError;
use crate::interfaces::SearchIndexProvider;
use crate::query::{QueryDocument, QueryFactory};
use crate::types::BatchOperationSummary;
use search_core_shared::{NormalizedDocument, SearchRequest, SearchResponse};

/// A write against one entity type's index.
enum Mutation<'a> {
    Add(&'a NormalizedDocument),
    AddMany(&'a [NormalizedDocument]),
    Update(&'a NormalizedDocument),
    Delete(&'a str),
}

impl Mutation<'_> {
    fn name(&self) -> &'static str {
        match self {
            Mutation::Add(_) => "add",
            Mutation::AddMany(_) => "add_many",
            Mutation::Update(_) => "update",
            Mutation::Delete(_) => "delete",
        }
    }
}

/// Accepts documents keyed by entity type and executes searches.
pub struct ConnectionSink {
    provider: Arc<dyn SearchIndexProvider>,
    query_factory: QueryFactory,
    config: SinkConfig,
}

impl ConnectionSink {
    /// Create a new sink with default configuration.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            query_factory: QueryFactory::new(),
            config: SinkConfig::default(),
        }
    }

    /// Create a new sink with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: SinkConfig) -> Self {
        Self {
            provider,
            query_factory: QueryFactory::new(),
            config,
        }
    }

    /// Replace the query factory used by [`search`](Self::search).
    pub fn with_query_factory(mut self, query_factory: QueryFactory) -> Self {
        self.query_factory = query_factory;
        self
    }

    pub fn query_factory(&self) -> &QueryFactory {
        &self.query_factory
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SinkError> {
        match self.config.max_batch_size {
            Some(max) if !self.config.accepts(size) => {
                Err(SinkError::batch_size_exceeded(size, max))
            }
            _ => Ok(()),
        }
    }

    fn require_identifier(document: &NormalizedDocument) -> Result<String, SinkError> {
        document
            .identifier()
            .ok_or_else(|| SinkError::validation("document has no search_identifier"))
    }

    /// Add a single document.
    pub async fn add_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        Self::require_identifier(document)?;
        self.with_type(entity_type, Mutation::Add(document))
            .await
            .map(|_| ())
    }

    /// Add a batch of documents.
    ///
    /// An empty batch is not sent and does not refresh the index.
    pub async fn add_documents(
        &self,
        entity_type: &str,
        documents: &[NormalizedDocument],
    ) -> Result<BatchOperationSummary, SinkError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(documents.len())?;
        for document in documents {
            Self::require_identifier(document)?;
        }

        self.with_type(entity_type, Mutation::AddMany(documents))
            .await
            .map(|summary| summary.unwrap_or_default())
    }

    /// Replace an existing document, creating it if missing.
    pub async fn update_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        Self::require_identifier(document)?;
        self.with_type(entity_type, Mutation::Update(document))
            .await
            .map(|_| ())
    }

    /// Delete a document by identifier.
    pub async fn delete_document(&self, entity_type: &str, identifier: &str) -> Result<(), SinkError> {
        if identifier.is_empty() {
            return Err(SinkError::validation("identifier is required"));
        }
        self.with_type(entity_type, Mutation::Delete(identifier))
            .await
            .map(|_| ())
    }

    /// Build the query for `request` and execute it.
    ///
    /// Any failure is reported as a single [`SinkError::SearchError`].
    #[instrument(skip(self, request), fields(term = %request.term()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SinkError> {
        let query = self.query_factory.build(request);
        self.search_query(&query).await
    }

    /// Execute an already built query document.
    pub async fn search_query(&self, query: &QueryDocument) -> Result<SearchResponse, SinkError> {
        self.provider.search(query).await.map_err(|e| match e {
            SinkError::SearchError(_) => e,
            other => SinkError::search(other.to_string()),
        })
    }

    /// Check if the search engine is reachable.
    pub async fn health_check(&self) -> Result<bool, SinkError> {
        self.provider.health_check().await
    }

    /// Run `mutation` against the index of `entity_type` and refresh it afterwards.
    ///
    /// The refresh runs even when the mutation fails; the mutation's error
    /// takes precedence over a refresh error.
    async fn with_type(
        &self,
        entity_type: &str,
        mutation: Mutation<'_>,
    ) -> Result<Option<BatchOperationSummary>, SinkError> {
        self.provider.ensure_index(entity_type).await?;

        let operation = mutation.name();
        let result = match mutation {
            Mutation::Add(document) => self
                .provider
                .index_document(entity_type, document)
                .await
                .map(|_| None),
            Mutation::AddMany(documents) => self
                .provider
                .bulk_index_documents(entity_type, documents)
                .await
                .map(Some),
            Mutation::Update(document) => self
                .provider
                .update_document(entity_type, document)
                .await
                .map(|_| None),
            Mutation::Delete(identifier) => self
                .provider
                .delete_document(entity_type, identifier)
                .await
                .map(|_| None),
        };

        let refreshed = self.provider.refresh(entity_type).await;

        match (result, refreshed) {
            (Ok(outcome), Ok(())) => {
                debug!(entity_type = %entity_type, operation, "Index mutated and refreshed");
                Ok(outcome)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), refreshed) => {
                if let Err(refresh_error) = refreshed {
                    warn!(
                        entity_type = %entity_type,
                        operation,
                        error = %refresh_error,
                        "Refresh after failed mutation also failed"
                    );
                }
                Err(e)
            }
        }
    }
}
