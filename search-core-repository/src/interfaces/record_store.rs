//! Record store trait definition.

use async_trait::async_trait;

use crate::types::RecordQuery;
use search_core_shared::RawRecord;

/// Read access to the host's structured records.
///
/// Implementations execute the query's clauses against the host
/// persistence layer. Both methods return `None` when the backend is
/// unavailable, so an outage is never mistaken for a missing row.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Select one page of rows.
    ///
    /// # Returns
    ///
    /// * `Some(rows)` - The page, empty when there are no more rows
    /// * `None` - The backend could not be queried
    async fn select_page(&self, query: &RecordQuery) -> Option<Vec<RawRecord>>;

    /// Select a single row.
    ///
    /// # Returns
    ///
    /// * `Some(Some(row))` - The matching row
    /// * `Some(None)` - No row matched
    /// * `None` - The backend could not be queried
    async fn select_one(&self, query: &RecordQuery) -> Option<Option<RawRecord>>;
}
