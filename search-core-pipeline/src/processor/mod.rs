//! Record processing.
//!
//! Turns raw records into normalized documents: relation fields are
//! resolved to labels, then the record is normalized.

mod normalizer;
mod relation_resolver;

pub use normalizer::normalize;
pub use relation_resolver::RelationResolver;

use tracing::{debug, instrument};

use crate::schema::EntitySchema;
use search_core_shared::{NormalizedDocument, RawRecord};

/// Documents produced from one page of records.
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    pub documents: Vec<NormalizedDocument>,
    /// Records dropped because they sit in a blacklisted container.
    pub skipped: usize,
}

/// Processor that transforms raw records into search documents.
pub struct RecordProcessor {
    resolver: RelationResolver,
}

impl RecordProcessor {
    pub fn new(resolver: RelationResolver) -> Self {
        Self { resolver }
    }

    /// Resolve and normalize a single record.
    pub async fn process(&self, schema: &EntitySchema, record: RawRecord) -> NormalizedDocument {
        let record = self.resolver.resolve(schema, record).await;
        normalize(schema, record)
    }

    /// Process a page of records, dropping blacklisted ones.
    #[instrument(skip(self, schema, records), fields(entity_type = %schema.name(), record_count = records.len()))]
    pub async fn process_batch(
        &self,
        schema: &EntitySchema,
        records: Vec<RawRecord>,
    ) -> ProcessedBatch {
        let mut batch = ProcessedBatch {
            documents: Vec::with_capacity(records.len()),
            skipped: 0,
        };

        for record in records {
            if schema.is_blacklisted(&record) {
                debug!(uid = ?record.uid(), "Skipping record in blacklisted container");
                batch.skipped += 1;
                continue;
            }
            batch.documents.push(self.process(schema, record).await);
        }

        debug!(
            processed_count = batch.documents.len(),
            skipped = batch.skipped,
            "Processed record batch"
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RecordSource;
    use crate::testing::{registry, InMemoryStore};
    use search_core_shared::MapConfiguration;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_process_batch_skips_blacklisted() {
        let registry = Arc::new(registry(
            MapConfiguration::new().with("index", "rootLineBlacklist", "2"),
        ));
        let source = RecordSource::new(Arc::new(InMemoryStore::with_fixtures()));
        let processor = RecordProcessor::new(RelationResolver::new(Arc::clone(&registry), source));
        let schema = registry.schema_for("tt_content").unwrap();

        let records = vec![
            RawRecord::new().with("uid", 1).with("pid", 1).with("header", "Kept"),
            RawRecord::new().with("uid", 2).with("pid", 2).with("header", "Dropped"),
        ];
        let batch = processor.process_batch(&schema, records).await;

        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.documents.len(), 1);
        assert_eq!(batch.documents[0].title(), Some(&json!("Kept")));
    }

    #[tokio::test]
    async fn test_process_resolves_before_normalizing() {
        let registry = Arc::new(registry(MapConfiguration::new()));
        let source = RecordSource::new(Arc::new(InMemoryStore::with_fixtures()));
        let processor = RecordProcessor::new(RelationResolver::new(Arc::clone(&registry), source));
        let schema = registry.schema_for("tt_content").unwrap();

        let document = processor
            .process(
                &schema,
                RawRecord::new()
                    .with("uid", 5)
                    .with("header", "Hello")
                    .with("categories", "2"),
            )
            .await;

        assert_eq!(document.identifier(), Some("5".to_string()));
        assert_eq!(document.get("categories"), Some(&json!("Events")));
    }
}
