//! Request and response types for store and sink operations.

use crate::errors::SinkError;

/// Offset/limit window of a paged select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    pub offset: usize,
    pub limit: usize,
}

impl PageLimit {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// A select against the host record store.
///
/// The clauses are SQL fragments in the host's dialect. `table` and `uid`
/// repeat the structured parts of the query for stores that do not parse
/// the clauses themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Entity table being selected.
    pub table: String,
    /// Qualified field names (`table.field`).
    pub fields: Vec<String>,
    /// FROM clause, including joins.
    pub from: String,
    /// WHERE clause.
    pub where_clause: String,
    /// ORDER BY clause.
    pub order_by: Option<String>,
    /// Window for paged selects.
    pub limit: Option<PageLimit>,
    /// Set when selecting a single record by identifier.
    pub uid: Option<i64>,
}

impl RecordQuery {
    /// Fields joined into a select list.
    pub fn fields_clause(&self) -> String {
        self.fields.join(",")
    }

    /// The window rendered as `offset,limit`.
    pub fn limit_clause(&self) -> Option<String> {
        self.limit
            .map(|limit| format!("{},{}", limit.offset, limit.limit))
    }
}

/// Result of a batch operation for a single document.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document identifier.
    pub identifier: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SinkError>,
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Lets callers handle partial failures of a bulk request gracefully.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Summary of an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from individual results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}
