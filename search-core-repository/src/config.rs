//! Connection sink settings.

/// Largest batch the sink forwards to the provider unless configured otherwise.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Settings of a [`ConnectionSink`](crate::ConnectionSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Upper bound on the documents of one `add_documents` call.
    /// `None` accepts batches of any size.
    pub max_batch_size: Option<usize>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(DEFAULT_MAX_BATCH_SIZE),
        }
    }
}

impl SinkConfig {
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }

    /// Settings accepting whole indexer pages of `page_size` records.
    ///
    /// The limit never drops below [`DEFAULT_MAX_BATCH_SIZE`].
    pub fn for_page_size(page_size: usize) -> Self {
        Self::with_max_batch_size(page_size.max(DEFAULT_MAX_BATCH_SIZE))
    }

    /// Whether a batch of `size` documents is within the limit.
    pub fn accepts(&self, size: usize) -> bool {
        self.max_batch_size.map_or(true, |max| size <= max)
    }
}
