//! Test doubles and fixtures shared by the pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::schema::{
    ColumnConfig, ColumnDefinition, CtrlDefinition, EnableColumns, SchemaRegistry, SelectItem,
    TableDefinition,
};
use search_core_repository::{
    BatchOperationResult, BatchOperationSummary, PageLimit, QueryDocument, RecordQuery, RecordStore,
    SearchIndexProvider, SinkError,
};
use search_core_shared::{MapConfiguration, NormalizedDocument, RawRecord, SearchResponse};

fn ctrl(label: &str) -> CtrlDefinition {
    CtrlDefinition {
        label: Some(label.to_string()),
        delete: Some("deleted".to_string()),
        enable_columns: EnableColumns {
            disabled: Some("hidden".to_string()),
        },
        ..CtrlDefinition::default()
    }
}

/// Definitions of `pages`, `tt_content` and `sys_category`.
pub fn definitions() -> Vec<TableDefinition> {
    vec![
        TableDefinition {
            name: "pages".to_string(),
            ctrl: ctrl("title"),
            columns: vec![ColumnDefinition::new("title", ColumnConfig::Input)],
        },
        TableDefinition {
            name: "tt_content".to_string(),
            ctrl: CtrlDefinition {
                language_field: Some("sys_language_uid".to_string()),
                cruser_id: Some("cruser_id".to_string()),
                ..ctrl("header")
            },
            columns: vec![
                ColumnDefinition::new("header", ColumnConfig::Input),
                ColumnDefinition::new("bodytext", ColumnConfig::Text),
                ColumnDefinition::new("sys_language_uid", ColumnConfig::Input),
                ColumnDefinition::new("t3ver_wsid", ColumnConfig::Input),
                ColumnDefinition::new(
                    "categories",
                    ColumnConfig::Group {
                        foreign_table: "sys_category".to_string(),
                    },
                ),
                ColumnDefinition::new(
                    "layout",
                    ColumnConfig::Select {
                        foreign_table: None,
                        items: vec![SelectItem::new("Default", "0"), SelectItem::new("Wide", "1")],
                    },
                ),
            ],
        },
        TableDefinition {
            name: "sys_category".to_string(),
            ctrl: ctrl("title"),
            columns: vec![ColumnDefinition::new("title", ColumnConfig::Input)],
        },
    ]
}

/// Registry over [`definitions`] with the given configuration.
pub fn registry(configuration: MapConfiguration) -> SchemaRegistry {
    SchemaRegistry::new(definitions(), Arc::new(configuration))
}

/// Record store keeping rows in memory.
///
/// Clauses are not evaluated; hidden rows are tracked explicitly instead.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, Vec<RawRecord>>>,
    hidden: Mutex<HashSet<(String, i64)>>,
    unavailable: AtomicBool,
    fail_after_pages: Mutex<Option<usize>>,
    page_calls: AtomicUsize,
    queries: Mutex<Vec<RecordQuery>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures() -> Self {
        let store = Self::new();
        store.insert("pages", RawRecord::new().with("uid", 1).with("pid", 0).with("title", "Home"));
        store.insert("pages", RawRecord::new().with("uid", 2).with("pid", 1).with("title", "Archive"));

        store.insert(
            "tt_content",
            RawRecord::new()
                .with("uid", 1)
                .with("pid", 1)
                .with("header", "Welcome")
                .with("bodytext", "Hello")
                .with("categories", "1")
                .with("layout", "0"),
        );
        store.insert(
            "tt_content",
            RawRecord::new()
                .with("uid", 2)
                .with("pid", 1)
                .with("header", "Latest news")
                .with("categories", "1")
                .with("layout", "1"),
        );
        store.insert(
            "tt_content",
            RawRecord::new()
                .with("uid", 3)
                .with("pid", 1)
                .with("header", "Contact")
                .with("categories", "0"),
        );

        store.insert("sys_category", RawRecord::new().with("uid", 1).with("pid", 1).with("title", "News"));
        store.insert("sys_category", RawRecord::new().with("uid", 2).with("pid", 1).with("title", "Events"));
        store
    }

    pub fn insert(&self, table: &str, record: RawRecord) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record);
    }

    pub fn clear(&self, table: &str) {
        self.tables.lock().unwrap().remove(table);
    }

    pub fn hide(&self, table: &str, uid: i64) {
        self.hidden.lock().unwrap().insert((table.to_string(), uid));
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let the first `pages` page selects succeed and fail every later one.
    pub fn fail_after_pages(&self, pages: usize) {
        *self.fail_after_pages.lock().unwrap() = Some(pages);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<RecordQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn visible_rows(&self, table: &str) -> Vec<RawRecord> {
        let hidden = self.hidden.lock().unwrap();
        let mut rows: Vec<RawRecord> = self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| {
                row.uid()
                    .map_or(true, |uid| !hidden.contains(&(table.to_string(), uid)))
            })
            .collect();
        rows.sort_by_key(|row| row.uid());
        rows
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select_page(&self, query: &RecordQuery) -> Option<Vec<RawRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        let call = self.page_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let exhausted = self
            .fail_after_pages
            .lock()
            .unwrap()
            .is_some_and(|pages| call > pages);
        if self.unavailable.load(Ordering::SeqCst) || exhausted {
            return None;
        }

        let limit = query.limit.unwrap_or(PageLimit::new(0, usize::MAX));
        Some(
            self.visible_rows(&query.table)
                .into_iter()
                .skip(limit.offset)
                .take(limit.limit)
                .collect(),
        )
    }

    async fn select_one(&self, query: &RecordQuery) -> Option<Option<RawRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.unavailable.load(Ordering::SeqCst) {
            return None;
        }

        Some(query.uid.and_then(|uid| {
            self.visible_rows(&query.table)
                .into_iter()
                .find(|row| row.uid() == Some(uid))
        }))
    }
}

/// Search index provider recording every write.
#[derive(Default)]
pub struct RecordingProvider {
    documents: Mutex<Vec<NormalizedDocument>>,
    deleted: Mutex<Vec<String>>,
    add_calls: AtomicUsize,
    bulk_calls: AtomicUsize,
    update_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Documents added individually or in bulk.
    pub fn documents(&self) -> Vec<NormalizedDocument> {
        self.documents.lock().unwrap().clone()
    }

    pub fn indexed_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), SinkError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(SinkError::bulk_index("write rejected"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SearchIndexProvider for RecordingProvider {
    async fn ensure_index(&self, _entity_type: &str) -> Result<(), SinkError> {
        Ok(())
    }

    async fn index_document(
        &self,
        _entity_type: &str,
        document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn bulk_index_documents(
        &self,
        _entity_type: &str,
        documents: &[NormalizedDocument],
    ) -> Result<BatchOperationSummary, SinkError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.documents.lock().unwrap().extend_from_slice(documents);

        let results = documents
            .iter()
            .map(|document| BatchOperationResult {
                identifier: document.identifier().unwrap_or_default(),
                success: true,
                error: None,
            })
            .collect();
        Ok(BatchOperationSummary::from_results(results))
    }

    async fn update_document(
        &self,
        _entity_type: &str,
        _document: &NormalizedDocument,
    ) -> Result<(), SinkError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()
    }

    async fn delete_document(&self, _entity_type: &str, identifier: &str) -> Result<(), SinkError> {
        self.check_write()?;
        self.deleted.lock().unwrap().push(identifier.to_string());
        Ok(())
    }

    async fn refresh(&self, _entity_type: &str) -> Result<(), SinkError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn search(&self, _query: &QueryDocument) -> Result<SearchResponse, SinkError> {
        Ok(SearchResponse::empty())
    }

    async fn health_check(&self) -> Result<bool, SinkError> {
        Ok(true)
    }
}
