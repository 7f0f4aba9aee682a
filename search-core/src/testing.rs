//! Test doubles for the application crate.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use search_core_repository::{
    BatchOperationSummary, QueryDocument, RecordQuery, RecordStore, SearchIndexProvider, SinkError,
};
use search_core_shared::{NormalizedDocument, RawRecord, SearchResponse};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `contents` to a fresh file in the temp directory.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let id = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "search-core-{}-{}-{}.json",
        name,
        std::process::id(),
        id
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Store without any records.
pub struct EmptyStore;

#[async_trait]
impl RecordStore for EmptyStore {
    async fn select_page(&self, _query: &RecordQuery) -> Option<Vec<RawRecord>> {
        Some(Vec::new())
    }

    async fn select_one(&self, _query: &RecordQuery) -> Option<Option<RawRecord>> {
        Some(None)
    }
}

/// Provider accepting every write and answering searches with no hits.
pub struct StaticProvider {
    healthy: bool,
}

impl StaticProvider {
    pub fn healthy() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl SearchIndexProvider for StaticProvider {
    async fn ensure_index(&self, _entity_type: &str) -> Result<(), SinkError> {
        Ok(())
    }

    async fn index_document(
        &self,
        _entity_type: &str,
        _document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    async fn bulk_index_documents(
        &self,
        _entity_type: &str,
        documents: &[NormalizedDocument],
    ) -> Result<BatchOperationSummary, SinkError> {
        Ok(BatchOperationSummary {
            total: documents.len(),
            succeeded: documents.len(),
            failed: 0,
            results: vec![],
        })
    }

    async fn update_document(
        &self,
        _entity_type: &str,
        _document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    async fn delete_document(&self, _entity_type: &str, _identifier: &str) -> Result<(), SinkError> {
        Ok(())
    }

    async fn refresh(&self, _entity_type: &str) -> Result<(), SinkError> {
        Ok(())
    }

    async fn search(&self, _query: &QueryDocument) -> Result<SearchResponse, SinkError> {
        Ok(SearchResponse::empty())
    }

    async fn health_check(&self) -> Result<bool, SinkError> {
        Ok(self.healthy)
    }
}
