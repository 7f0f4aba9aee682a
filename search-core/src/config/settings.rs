//! Process settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::AppError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default prefix of the per entity type indexes.
const DEFAULT_INDEX_PREFIX: &str = "search-core";

/// Default number of records per page.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Default table records point into through their `pid`.
const DEFAULT_CONTAINER_TABLE: &str = "pages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub opensearch_url: String,
    pub index_prefix: String,
    pub batch_size: usize,
    /// JSON file holding the table definitions.
    pub schema_path: PathBuf,
    /// Optional JSON file holding section/key configuration.
    pub config_path: Option<PathBuf>,
    pub container_table: String,
}

impl Settings {
    /// Read settings from the environment, loading a `.env` file first if present.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_CORE_INDEX_PREFIX`: Index name prefix (default: search-core)
    /// - `SEARCH_CORE_BATCH_SIZE`: Records per page (default: 100)
    /// - `SEARCH_CORE_SCHEMA_PATH`: Table definitions file (required)
    /// - `SEARCH_CORE_CONFIG_PATH`: Section/key configuration file (optional)
    /// - `SEARCH_CORE_CONTAINER_TABLE`: Container table (default: pages)
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let batch_size = match value("SEARCH_CORE_BATCH_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::config(format!(
                        "SEARCH_CORE_BATCH_SIZE must be a positive integer, got \"{}\"",
                        raw
                    )))
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let schema_path = value("SEARCH_CORE_SCHEMA_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| AppError::config("SEARCH_CORE_SCHEMA_PATH is not set"))?;

        Ok(Self {
            opensearch_url: value("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            index_prefix: value("SEARCH_CORE_INDEX_PREFIX")
                .unwrap_or_else(|| DEFAULT_INDEX_PREFIX.to_string()),
            batch_size,
            schema_path,
            config_path: value("SEARCH_CORE_CONFIG_PATH").map(PathBuf::from),
            container_table: value("SEARCH_CORE_CONTAINER_TABLE")
                .unwrap_or_else(|| DEFAULT_CONTAINER_TABLE.to_string()),
        })
    }
}
