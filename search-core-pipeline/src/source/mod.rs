//! Record source adapter.
//!
//! Translates entity schemas into [`RecordQuery`]s and hands them to the
//! injected [`RecordStore`]. Only visible, searchable records are returned.

mod clause;

use std::sync::Arc;

use tracing::debug;

use crate::errors::IndexingError;
use crate::schema::EntitySchema;
use search_core_repository::{PageLimit, RecordQuery, RecordStore};
use search_core_shared::RawRecord;

pub use clause::{order_clause, single_where_clause, table_clause, where_clause};

/// Reads visible records of an entity type from the record store.
#[derive(Clone)]
pub struct RecordSource {
    store: Arc<dyn RecordStore>,
}

impl RecordSource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetch up to `limit` records starting at `offset`, ordered by uid.
    ///
    /// The indexer passes its page size plus one as `limit`; the extra row
    /// only signals that another page follows and is fetched again as the
    /// first row of that page.
    ///
    /// # Returns
    ///
    /// * `Some(records)` - The page, empty once all records were read
    /// * `None` - The store could not be queried
    pub async fn fetch_page(
        &self,
        schema: &EntitySchema,
        offset: usize,
        limit: usize,
    ) -> Option<Vec<RawRecord>> {
        let query = RecordQuery {
            table: schema.name().to_string(),
            fields: schema.fields_clause(),
            from: table_clause(schema),
            where_clause: where_clause(schema),
            order_by: Some(order_clause(schema)),
            limit: Some(PageLimit::new(offset, limit)),
            uid: None,
        };
        log_query(&query);

        self.store.select_page(&query).await
    }

    /// Fetch a single visible record.
    ///
    /// Fails with [`IndexingError::NoRecordFound`] when the record does not
    /// exist or is not visible, and with [`IndexingError::BackendUnavailable`]
    /// when the store could not be queried.
    pub async fn fetch_one(
        &self,
        schema: &EntitySchema,
        identifier: i64,
    ) -> Result<RawRecord, IndexingError> {
        let query = RecordQuery {
            table: schema.name().to_string(),
            fields: schema.fields_clause(),
            from: table_clause(schema),
            where_clause: single_where_clause(schema, identifier),
            order_by: None,
            limit: None,
            uid: Some(identifier),
        };
        log_query(&query);

        self.store
            .select_one(&query)
            .await
            .ok_or_else(|| IndexingError::unavailable_record(schema.name(), identifier))?
            .ok_or_else(|| IndexingError::NoRecordFound {
                entity_type: schema.name().to_string(),
                identifier,
            })
    }
}

fn log_query(query: &RecordQuery) {
    debug!(table = %query.table, where_clause = %query.where_clause, "Generated where clause");
    debug!(table = %query.table, fields = %query.fields_clause(), "Generated fields");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{registry, InMemoryStore};
    use search_core_shared::MapConfiguration;

    #[tokio::test]
    async fn test_fetch_page_passes_window_and_order() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        let source = RecordSource::new(store.clone());
        let registry = registry(MapConfiguration::new());
        let schema = registry.schema_for("tt_content").unwrap();

        let page = source.fetch_page(&schema, 0, 2).await.unwrap();

        assert_eq!(page.len(), 2);
        let queries = store.queries();
        assert_eq!(queries[0].limit, Some(PageLimit::new(0, 2)));
        assert_eq!(queries[0].order_by.as_deref(), Some("tt_content.uid"));
        assert_eq!(queries[0].fields[0], "tt_content.uid");
    }

    #[tokio::test]
    async fn test_fetch_page_reports_unavailable_backend() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        store.set_unavailable(true);
        let source = RecordSource::new(store);
        let registry = registry(MapConfiguration::new());
        let schema = registry.schema_for("tt_content").unwrap();

        assert!(source.fetch_page(&schema, 0, 10).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_one_missing_record() {
        let source = RecordSource::new(Arc::new(InMemoryStore::with_fixtures()));
        let registry = registry(MapConfiguration::new());
        let schema = registry.schema_for("tt_content").unwrap();

        let err = source.fetch_one(&schema, 999).await.unwrap_err();
        assert!(matches!(
            err,
            IndexingError::NoRecordFound { identifier: 999, .. }
        ));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_fetch_one_reports_unavailable_backend() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        store.set_unavailable(true);
        let source = RecordSource::new(store);
        let registry = registry(MapConfiguration::new());
        let schema = registry.schema_for("tt_content").unwrap();

        let err = source.fetch_one(&schema, 1).await.unwrap_err();
        assert_eq!(err.code(), IndexingError::CODE_BACKEND_UNAVAILABLE);
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_fetch_one_hidden_record_is_not_found() {
        let store = Arc::new(InMemoryStore::with_fixtures());
        store.hide("tt_content", 1);
        let source = RecordSource::new(store);
        let registry = registry(MapConfiguration::new());
        let schema = registry.schema_for("tt_content").unwrap();

        assert!(source.fetch_one(&schema, 1).await.is_err());
        assert!(source.fetch_one(&schema, 2).await.is_ok());
    }
}
