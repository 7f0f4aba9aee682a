//! Index runs over several entity types.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use search_core_pipeline::{IndexRunReport, Indexer};

/// Runs full index runs one entity type after another.
///
/// A failed run is reported and does not stop the remaining types.
pub struct IndexRunner {
    indexer: Arc<Indexer>,
}

impl IndexRunner {
    pub fn new(indexer: Arc<Indexer>) -> Self {
        Self { indexer }
    }

    /// Index every indexable entity type; the container table is skipped.
    pub async fn run_all(&self) -> Vec<IndexRunReport> {
        let entity_types = self.indexer.registry().entity_types();
        self.run(&entity_types).await
    }

    /// Index the given entity types in order.
    #[instrument(skip(self, entity_types), fields(entity_type_count = entity_types.len()))]
    pub async fn run(&self, entity_types: &[String]) -> Vec<IndexRunReport> {
        let mut reports = Vec::with_capacity(entity_types.len());

        for entity_type in entity_types {
            let report = self.indexer.index_all(entity_type).await;
            if !report.is_success() {
                warn!(entity_type = %entity_type, "Index run failed, continuing with next type");
            }
            reports.push(report);
        }

        let failed = reports.iter().filter(|report| !report.is_success()).count();
        info!(
            succeeded = reports.len() - failed,
            failed = failed,
            "Index runs finished"
        );
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Dependencies, Settings};
    use crate::testing::{write_temp, EmptyStore, StaticProvider};
    use search_core_pipeline::IndexingState;

    #[tokio::test]
    async fn test_failure_does_not_stop_other_types() {
        let settings = Settings {
            opensearch_url: "http://localhost:9200".to_string(),
            index_prefix: "search-core".to_string(),
            batch_size: 10,
            schema_path: write_temp(
                "runner-tables",
                r#"[
                    {"name": "pages", "ctrl": {"label": "title"}},
                    {"name": "tt_content", "ctrl": {"label": "header"}}
                ]"#,
            ),
            config_path: None,
            container_table: "pages".to_string(),
        };
        let dependencies = Dependencies::with_provider(
            &settings,
            Arc::new(EmptyStore),
            Arc::new(StaticProvider::healthy()),
        )
        .await
        .unwrap();

        let reports = dependencies
            .runner()
            .run(&[
                "tx_missing".to_string(),
                "pages".to_string(),
                "tt_content".to_string(),
            ])
            .await;

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].state, IndexingState::Failed);
        assert!(reports[0].error.as_ref().unwrap().is_configuration());
        assert_eq!(reports[1].state, IndexingState::Failed);
        assert!(reports[1].error.as_ref().unwrap().is_configuration());
        assert!(reports[2].is_success());
    }

    #[tokio::test]
    async fn test_run_all_skips_container_table() {
        let settings = Settings {
            opensearch_url: "http://localhost:9200".to_string(),
            index_prefix: "search-core".to_string(),
            batch_size: 10,
            schema_path: write_temp(
                "runner-all-tables",
                r#"[
                    {"name": "pages", "ctrl": {"label": "title"}},
                    {"name": "tt_content", "ctrl": {"label": "header"}}
                ]"#,
            ),
            config_path: None,
            container_table: "pages".to_string(),
        };
        let dependencies = Dependencies::with_provider(
            &settings,
            Arc::new(EmptyStore),
            Arc::new(StaticProvider::healthy()),
        )
        .await
        .unwrap();

        let reports = dependencies.runner().run_all().await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].entity_type, "tt_content");
        assert!(reports[0].is_success());
    }
}
