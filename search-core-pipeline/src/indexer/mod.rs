//! Indexer.
//!
//! Drives full and single record indexing runs for one entity type at a
//! time: records are paged out of the store, processed into documents and
//! handed to the connection sink.

mod report;

pub use report::{IndexRunReport, IndexingState, RecordOutcome};

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::errors::IndexingError;
use crate::processor::{RecordProcessor, RelationResolver};
use crate::schema::{EntitySchema, SchemaRegistry};
use crate::source::RecordSource;
use search_core_repository::{ConnectionSink, RecordStore};
use search_core_shared::RawRecord;

/// Configuration for the indexer.
#[derive(Debug, Clone, Copy)]
pub struct IndexerConfig {
    /// Number of records fetched and sunk per page.
    pub batch_size: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

pub struct Indexer {
    registry: Arc<SchemaRegistry>,
    source: RecordSource,
    processor: RecordProcessor,
    sink: Arc<ConnectionSink>,
    config: IndexerConfig,
}

impl Indexer {
    /// Create a new indexer with default configuration.
    pub fn new(
        registry: Arc<SchemaRegistry>,
        store: Arc<dyn RecordStore>,
        sink: Arc<ConnectionSink>,
    ) -> Self {
        Self::with_config(registry, store, sink, IndexerConfig::default())
    }

    /// Create a new indexer with custom configuration.
    pub fn with_config(
        registry: Arc<SchemaRegistry>,
        store: Arc<dyn RecordStore>,
        sink: Arc<ConnectionSink>,
        config: IndexerConfig,
    ) -> Self {
        let source = RecordSource::new(store);
        let resolver = RelationResolver::new(Arc::clone(&registry), source.clone());

        Self {
            registry,
            source,
            processor: RecordProcessor::new(resolver),
            sink,
            config: IndexerConfig {
                batch_size: config.batch_size.max(1),
            },
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &ConnectionSink {
        &self.sink
    }

    /// Index every visible record of `entity_type`.
    ///
    /// Pages are fetched until an empty or short page is returned. A page
    /// the store cannot deliver fails the run; pages sunk before the failure
    /// stay in the index.
    #[instrument(skip(self), fields(batch_size = self.config.batch_size))]
    pub async fn index_all(&self, entity_type: &str) -> IndexRunReport {
        let mut report = IndexRunReport::new(entity_type);
        info!("Starting full index run");

        match self.registry.indexable_schema(entity_type) {
            Ok(schema) => {
                if let Err(e) = self.run_pages(&schema, &mut report).await {
                    report.fail(e);
                }
            }
            Err(e) => report.fail(e),
        }

        if let Some(e) = &report.error {
            error!(
                code = e.code(),
                error = %e,
                pages = report.pages,
                documents = report.documents,
                "Index run failed"
            );
        } else {
            report.transition(IndexingState::Done);
            info!(
                pages = report.pages,
                documents = report.documents,
                failed = report.failed,
                skipped = report.skipped,
                "Index run finished"
            );
        }

        report
    }

    async fn run_pages(
        &self,
        schema: &EntitySchema,
        report: &mut IndexRunReport,
    ) -> Result<(), IndexingError> {
        let batch_size = self.config.batch_size;
        let mut offset = 0;

        loop {
            report.transition(IndexingState::Paging);

            // The store is asked for one row past the page; its presence
            // means another page follows. This keeps the fetch count at
            // ceil(N / batch_size) even when N is a multiple of the page size.
            let mut records = self
                .source
                .fetch_page(schema, offset, batch_size + 1)
                .await
                .ok_or_else(|| IndexingError::unavailable_page(schema.name(), offset))?;
            report.pages += 1;

            if records.is_empty() {
                return Ok(());
            }

            let has_more = records.len() > batch_size;
            records.truncate(batch_size);

            report.transition(IndexingState::Normalizing);
            let batch = self.processor.process_batch(schema, records).await;
            report.skipped += batch.skipped;

            if !batch.documents.is_empty() {
                report.transition(IndexingState::Sinking);
                let summary = self
                    .sink
                    .add_documents(schema.name(), &batch.documents)
                    .await?;
                if summary.failed > 0 {
                    warn!(
                        offset = offset,
                        failed = summary.failed,
                        "Some documents of the page were rejected"
                    );
                }
                report.documents += summary.succeeded;
                report.failed += summary.failed;
            }

            debug!(offset = offset, pages = report.pages, "Page indexed");

            if !has_more {
                return Ok(());
            }
            offset += batch_size;
        }
    }

    /// Index a single record.
    ///
    /// A record that no longer exists or is not visible is removed from the
    /// index instead. A store outage is returned as an error and leaves the
    /// index untouched.
    #[instrument(skip(self))]
    pub async fn index_record(
        &self,
        entity_type: &str,
        identifier: i64,
    ) -> Result<RecordOutcome, IndexingError> {
        let schema = self.registry.indexable_schema(entity_type)?;

        let record = match self.source.fetch_one(&schema, identifier).await {
            Ok(record) if !schema.is_blacklisted(&record) => record,
            Ok(_) | Err(IndexingError::NoRecordFound { .. }) => {
                info!("Record is not indexable, removing it from the index");
                self.sink
                    .delete_document(entity_type, &identifier.to_string())
                    .await?;
                return Ok(RecordOutcome::Deleted);
            }
            Err(e) => return Err(e),
        };

        let document = self.processor.process(&schema, record).await;
        self.sink.add_document(entity_type, &document).await?;

        debug!("Record indexed");
        Ok(RecordOutcome::Indexed)
    }

    /// Replace the indexed document of `record`.
    #[instrument(skip(self, record), fields(uid = ?record.uid()))]
    pub async fn update_record(
        &self,
        entity_type: &str,
        record: RawRecord,
    ) -> Result<(), IndexingError> {
        let schema = self.registry.indexable_schema(entity_type)?;
        let document = self.processor.process(&schema, record).await;

        self.sink.update_document(entity_type, &document).await?;
        Ok(())
    }

    /// Remove a record's document from the index.
    #[instrument(skip(self))]
    pub async fn delete_record(&self, entity_type: &str, identifier: i64) -> Result<(), IndexingError> {
        self.registry.indexable_schema(entity_type)?;
        self.sink
            .delete_document(entity_type, &identifier.to_string())
            .await?;
        Ok(())
    }
}
