//! # Search Core
//!
//! Entry point and configuration for running the search core indexer.
//!
//! The host provides a [`RecordStore`](search_core_repository::RecordStore);
//! this crate loads settings and table definitions, connects to OpenSearch
//! and wires the indexing pipeline around the store.

pub mod config;
pub mod runner;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Dependencies, JsonConfiguration, Settings};
pub use runner::IndexRunner;

use search_core_pipeline::IndexingError;
use search_core_repository::SinkError;
use search_core_shared::ConfigurationError;
use thiserror::Error;

/// Errors that can occur during initialization or execution.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Indexing pipeline error.
    #[error("Indexing error: {0}")]
    Indexing(#[from] IndexingError),

    /// Search sink error.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ConfigurationError> for AppError {
    fn from(error: ConfigurationError) -> Self {
        Self::Config(error.to_string())
    }
}
