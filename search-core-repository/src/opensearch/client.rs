//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use std::collections::HashSet;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::response::Response,
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts, UpdateParts,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use url::Url;

use super::response::{parse_bulk_response, parse_search_response};
use crate::errors::SinkError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::query::QueryDocument;
use crate::types::BatchOperationSummary;
use search_core_shared::{NormalizedDocument, SearchResponse};

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use search_core_repository::opensearch::IndexConfig;
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::new("typo3")).await?;
/// let sink = ConnectionSink::new(Arc::new(provider));
/// sink.add_document("tt_content", &document).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
    known_indexes: RwLock<HashSet<String>>,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - Index naming and creation settings
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SinkError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SinkError> {
        let parsed_url = Url::parse(url).map_err(|e| SinkError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SinkError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            prefix = %index_config.prefix,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
            known_indexes: RwLock::new(HashSet::new()),
        })
    }

    fn document_id(document: &NormalizedDocument) -> Result<String, SinkError> {
        document
            .identifier()
            .ok_or_else(|| SinkError::validation("document has no search_identifier"))
    }

    /// Turn a non-success response into an error built by `make_error`.
    async fn check_response(
        response: Response,
        operation: &str,
        make_error: fn(String) -> SinkError,
    ) -> Result<Response, SinkError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "Request failed");
        Err(make_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Create the entity type's index unless it is already known to exist.
    async fn ensure_index(&self, entity_type: &str) -> Result<(), SinkError> {
        let index = self.index_config.index_name(entity_type);
        if self.known_indexes.read().await.contains(&index) {
            return Ok(());
        }

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&index]))
            .send()
            .await
            .map_err(|e| SinkError::connection(e.to_string()))?;

        if exists.status_code().as_u16() == 404 {
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(&index))
                .body(self.index_config.index_settings())
                .send()
                .await
                .map_err(|e| SinkError::index_creation(e.to_string()))?;
            Self::check_response(response, "Index creation", SinkError::IndexCreationError).await?;
            info!(index = %index, "Created index");
        } else {
            Self::check_response(exists, "Index lookup", SinkError::ConnectionError).await?;
        }

        self.known_indexes.write().await.insert(index);
        Ok(())
    }

    async fn index_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        let index = self.index_config.index_name(entity_type);
        let doc_id = Self::document_id(document)?;

        let response = self
            .client
            .index(IndexParts::IndexId(&index, &doc_id))
            .body(document.as_map())
            .send()
            .await
            .map_err(|e| SinkError::index(e.to_string()))?;
        Self::check_response(response, "Index", SinkError::IndexError).await?;

        debug!(index = %index, doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_index_documents(
        &self,
        entity_type: &str,
        documents: &[NormalizedDocument],
    ) -> Result<BatchOperationSummary, SinkError> {
        let index = self.index_config.index_name(entity_type);

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            let doc_id = Self::document_id(document)?;
            body.push(json!({"index": {"_id": doc_id}}).into());
            body.push(Value::Object(document.as_map().clone()).into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&index))
            .body(body)
            .send()
            .await
            .map_err(|e| SinkError::bulk_index(e.to_string()))?;
        let response = Self::check_response(response, "Bulk index", SinkError::BulkIndexError).await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        let summary = parse_bulk_response(&response_body);

        if summary.failed > 0 {
            error!(
                index = %index,
                failed = summary.failed,
                total = summary.total,
                "Bulk index had failures"
            );
        } else {
            debug!(index = %index, total = summary.total, "Bulk index completed");
        }

        Ok(summary)
    }

    /// Update a document, creating it if it doesn't exist (upsert).
    async fn update_document(
        &self,
        entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        let index = self.index_config.index_name(entity_type);
        let doc_id = Self::document_id(document)?;

        let response = self
            .client
            .update(UpdateParts::IndexId(&index, &doc_id))
            .body(json!({
                "doc": document.as_map(),
                "doc_as_upsert": true
            }))
            .send()
            .await
            .map_err(|e| SinkError::update(e.to_string()))?;
        Self::check_response(response, "Update", SinkError::UpdateError).await?;

        debug!(index = %index, doc_id = %doc_id, "Document updated/created");
        Ok(())
    }

    async fn delete_document(&self, entity_type: &str, identifier: &str) -> Result<(), SinkError> {
        let index = self.index_config.index_name(entity_type);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&index, identifier))
            .send()
            .await
            .map_err(|e| SinkError::delete(e.to_string()))?;

        // 404 is acceptable - document may not exist
        if response.status_code().as_u16() != 404 {
            Self::check_response(response, "Delete", SinkError::DeleteError).await?;
        }

        debug!(index = %index, doc_id = %identifier, "Document deleted");
        Ok(())
    }

    async fn refresh(&self, entity_type: &str) -> Result<(), SinkError> {
        let index = self.index_config.index_name(entity_type);

        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[&index]))
            .send()
            .await
            .map_err(|e| SinkError::refresh(e.to_string()))?;
        Self::check_response(response, "Refresh", SinkError::RefreshError).await?;

        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn search(&self, query: &QueryDocument) -> Result<SearchResponse, SinkError> {
        let pattern = self.index_config.search_pattern();

        let response = self
            .client
            .search(SearchParts::Index(&[&pattern]))
            .body(query.to_value())
            .send()
            .await
            .map_err(|e| SinkError::search(e.to_string()))?;
        let response = Self::check_response(response, "Search", SinkError::SearchError).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;

        let result = parse_search_response(&body, &query.aggregation_keys(), &self.index_config)?;
        debug!(total = result.total, returned = result.items.len(), "Search completed");
        Ok(result)
    }

    async fn health_check(&self) -> Result<bool, SinkError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SinkError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}
