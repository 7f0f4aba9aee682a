//! Run bookkeeping.

use std::fmt;

use tracing::debug;

use crate::errors::IndexingError;

/// State of an index run.
///
/// A run moves `Idle -> Paging -> (Normalizing -> Sinking)* -> Done`, or to
/// `Failed` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingState {
    Idle,
    Paging,
    Normalizing,
    Sinking,
    Done,
    Failed,
}

impl fmt::Display for IndexingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexingState::Idle => "idle",
            IndexingState::Paging => "paging",
            IndexingState::Normalizing => "normalizing",
            IndexingState::Sinking => "sinking",
            IndexingState::Done => "done",
            IndexingState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of indexing a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The record was added to the index.
    Indexed,
    /// The record was not indexable and its document was deleted.
    Deleted,
}

/// Result of a full index run of one entity type.
#[derive(Debug)]
pub struct IndexRunReport {
    pub entity_type: String,
    pub state: IndexingState,
    /// Pages fetched from the store.
    pub pages: usize,
    /// Documents accepted by the sink.
    pub documents: usize,
    /// Documents rejected by the sink within otherwise successful batches.
    pub failed: usize,
    /// Records dropped because they sit in a blacklisted container.
    pub skipped: usize,
    /// Set when the run failed.
    pub error: Option<IndexingError>,
}

impl IndexRunReport {
    pub(crate) fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            state: IndexingState::Idle,
            pages: 0,
            documents: 0,
            failed: 0,
            skipped: 0,
            error: None,
        }
    }

    pub(crate) fn transition(&mut self, state: IndexingState) {
        if self.state != state {
            debug!(entity_type = %self.entity_type, from = %self.state, to = %state, "State change");
            self.state = state;
        }
    }

    pub(crate) fn fail(&mut self, error: IndexingError) {
        self.transition(IndexingState::Failed);
        self.error = Some(error);
    }

    pub fn is_success(&self) -> bool {
        self.state == IndexingState::Done
    }

    /// Convert into a `Result`, keeping the report on success.
    pub fn into_result(self) -> Result<Self, IndexingError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_records_error() {
        let mut report = IndexRunReport::new("tt_content");
        report.transition(IndexingState::Paging);
        report.fail(IndexingError::unavailable_page("tt_content", 0));

        assert_eq!(report.state, IndexingState::Failed);
        assert!(!report.is_success());
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_successful_report_into_result() {
        let mut report = IndexRunReport::new("pages");
        report.transition(IndexingState::Done);

        assert!(report.is_success());
        assert_eq!(report.into_result().unwrap().entity_type, "pages");
    }
}
