//! Dependency initialization and wiring for the search core.

use std::sync::Arc;

use tracing::info;

use super::{JsonConfiguration, Settings};
use crate::runner::IndexRunner;
use crate::AppError;
use search_core_pipeline::{Indexer, IndexerConfig, RegistryConfig, SchemaRegistry};
use search_core_repository::opensearch::IndexConfig;
use search_core_repository::{
    ConnectionSink, OpenSearchProvider, RecordStore, SearchIndexProvider, SinkConfig,
};
use search_core_shared::{ConfigurationContainer, MapConfiguration};

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub registry: Arc<SchemaRegistry>,
    pub sink: Arc<ConnectionSink>,
    pub indexer: Arc<Indexer>,
}

impl Dependencies {
    /// Initialize all dependencies against OpenSearch.
    ///
    /// # Arguments
    ///
    /// * `settings` - Process settings, see [`Settings::from_env`]
    /// * `store` - The host's record store
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If initialization fails
    pub async fn new(settings: &Settings, store: Arc<dyn RecordStore>) -> Result<Self, AppError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            index_prefix = %settings.index_prefix,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(
            &settings.opensearch_url,
            IndexConfig::new(settings.index_prefix.clone()),
        )
        .await
        .map_err(|e| AppError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        Self::with_provider(settings, store, Arc::new(provider)).await
    }

    /// Initialize all dependencies around an already created provider.
    pub async fn with_provider(
        settings: &Settings,
        store: Arc<dyn RecordStore>,
        provider: Arc<dyn SearchIndexProvider>,
    ) -> Result<Self, AppError> {
        // A full indexer page has to fit into one sink batch.
        let sink = Arc::new(ConnectionSink::with_config(
            provider,
            SinkConfig::for_page_size(settings.batch_size),
        ));

        // Verify the search engine is reachable
        let healthy = sink
            .health_check()
            .await
            .map_err(|e| AppError::config(format!("Search engine health check failed: {}", e)))?;
        if !healthy {
            return Err(AppError::config("Search engine cluster is unhealthy"));
        }
        info!("Search engine connection verified");

        let configuration: Arc<dyn ConfigurationContainer> = match &settings.config_path {
            Some(path) => Arc::new(JsonConfiguration::from_file(path).await?),
            None => Arc::new(MapConfiguration::new()),
        };

        let definitions = tokio::fs::read_to_string(&settings.schema_path).await?;
        let registry = Arc::new(SchemaRegistry::from_json(
            &definitions,
            configuration,
            RegistryConfig {
                container_table: settings.container_table.clone(),
                ..RegistryConfig::default()
            },
        )?);
        info!(entity_types = ?registry.entity_types(), "Table definitions loaded");

        let indexer = Arc::new(Indexer::with_config(
            Arc::clone(&registry),
            store,
            Arc::clone(&sink),
            IndexerConfig {
                batch_size: settings.batch_size,
            },
        ));

        Ok(Self {
            registry,
            sink,
            indexer,
        })
    }

    /// Runner indexing entity types through the wired indexer.
    pub fn runner(&self) -> IndexRunner {
        IndexRunner::new(Arc::clone(&self.indexer))
    }
}
