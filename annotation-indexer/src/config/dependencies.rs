//! Dependency initialization and wiring for the annotation indexer.

use std::fs;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::IndexerConfig;
use crate::cli::Cli;
use crate::IndexingError;
use annotation_indexer_pipeline::{
    DocumentAssembler, IndexSink, Orchestrator, OrchestratorConfig,
};
use annotation_indexer_repository::opensearch::default_index_mapping;
use annotation_indexer_repository::{
    AnnoRepoClient, AnnotationStore, HttpTextSource, OpenSearchClient,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from the command line and configuration.
    ///
    /// The configuration and mapping are validated first; then the
    /// destination cluster must be healthy and the annotation store must
    /// answer its `about` call.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(cli: &Cli, config: &IndexerConfig) -> Result<Self, IndexingError> {
        let documents = config.document_definitions()?;
        let settings = config.assembler_settings()?;
        let mapping = load_mapping(cli)?;

        info!(
            annorepo_host = %cli.annorepo_host,
            annorepo_container = %cli.annorepo_container,
            elastic_host = %cli.elastic_host,
            elastic_index = %cli.elastic_index,
            "Initializing dependencies"
        );

        let search_client = OpenSearchClient::new(&cli.elastic_host).await?;
        let sink = IndexSink::new(Arc::new(search_client), &cli.elastic_index);
        let healthy = sink
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("Search cluster health check failed: {e}")))?;

        if !healthy {
            return Err(IndexingError::config("Search cluster is unhealthy"));
        }
        info!("Search cluster connection verified");

        let store = AnnoRepoClient::new(&cli.annorepo_host, &cli.annorepo_container)?;
        let about = store.about().await?;
        info!(about = %about, "Connected to AnnoRepo");

        let store: Arc<dyn AnnotationStore> = Arc::new(store);
        let assembler = DocumentAssembler::new(store.clone(), Arc::new(HttpTextSource::new()?), settings);

        let orchestrator = Orchestrator::new(
            store,
            assembler,
            sink,
            documents,
            OrchestratorConfig {
                mapping,
                show_progress: cli.progress,
            },
        );

        Ok(Self { orchestrator })
    }
}

/// The index mapping from `--mapping`, or the built-in one.
fn load_mapping(cli: &Cli) -> Result<Value, IndexingError> {
    let Some(path) = &cli.mapping else {
        return Ok(default_index_mapping());
    };

    let contents = fs::read_to_string(path).map_err(|e| {
        IndexingError::config(format!("Cannot read mapping {}: {e}", path.display()))
    })?;
    let mapping: Value = serde_json::from_str(&contents).map_err(|e| {
        IndexingError::config(format!("Invalid mapping {}: {e}", path.display()))
    })?;

    if !mapping.is_object() {
        warn!(path = %path.display(), "Mapping is not a JSON object");
        return Err(IndexingError::config("Index mapping must be a JSON object"));
    }
    Ok(mapping)
}
