//! Orchestrator module for the annotation indexer pipeline.
//!
//! Coordinates the cursor, assembler, and sink components.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::{pin_mut, TryStreamExt};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::assembler::DocumentAssembler;
use crate::cursor::PagedResultCursor;
use crate::errors::PipelineError;
use crate::loader::IndexSink;
use annotation_indexer_repository::AnnotationStore;
use annotation_indexer_shared::Query;

/// A kind of top-tier document and the query selecting its records.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDefinition {
    /// Written to the document's `type` field.
    pub doc_type: String,
    pub query: Query,
}

impl DocumentDefinition {
    pub fn new(doc_type: impl Into<String>, query: Query) -> Self {
        Self {
            doc_type: doc_type.into(),
            query,
        }
    }
}

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Settings and mappings the index is recreated from.
    pub mapping: Value,
    /// Log `n/total` progress after every written document.
    pub show_progress: bool,
}

/// Documents written per document type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.written.values().sum()
    }
}

/// Orchestrator that drives one indexing run.
///
/// The orchestrator:
/// - Resets the destination index before anything is written
/// - Runs the top-tier query of each document definition in turn
/// - Assembles and writes one document per record, strictly in order
/// - Stops at the first fatal error or on shutdown
pub struct Orchestrator {
    store: Arc<dyn AnnotationStore>,
    assembler: DocumentAssembler,
    sink: IndexSink,
    documents: Vec<DocumentDefinition>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        store: Arc<dyn AnnotationStore>,
        assembler: DocumentAssembler,
        sink: IndexSink,
        documents: Vec<DocumentDefinition>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            store,
            assembler,
            sink,
            documents,
            config,
        }
    }

    /// Run until every document is written, an error occurs or Ctrl-C is
    /// received.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until every document is written, an error occurs or `shutdown`
    /// completes. Shutdown drops all in-flight requests.
    #[instrument(skip(self, shutdown), fields(index = %self.sink.index()))]
    pub async fn run_until<F>(&self, shutdown: F) -> Result<RunSummary, PipelineError>
    where
        F: Future<Output = ()>,
    {
        info!("Starting annotation indexer orchestrator");

        tokio::select! {
            biased;
            _ = shutdown => {
                info!("Received shutdown signal");
                Err(PipelineError::Cancelled)
            }
            result = self.index_all() => result,
        }
    }

    async fn index_all(&self) -> Result<RunSummary, PipelineError> {
        self.sink.reset_index(&self.config.mapping).await?;

        let mut summary = RunSummary::default();
        for definition in &self.documents {
            let written = self.index_documents(definition).await?;
            *summary
                .written
                .entry(definition.doc_type.clone())
                .or_default() += written;
        }

        info!(total = summary.total(), "Indexing run complete");
        Ok(summary)
    }

    /// Index every record of one document definition.
    #[instrument(skip(self, definition), fields(doc_type = %definition.doc_type))]
    async fn index_documents(&self, definition: &DocumentDefinition) -> Result<usize, PipelineError> {
        let mut cursor = PagedResultCursor::open(self.store.clone(), &definition.query).await?;

        let total = if self.config.show_progress {
            cursor.hits().await?
        } else {
            None
        };
        info!(hits = ?total, "Indexing top-tier records");

        let records = cursor.into_stream();
        pin_mut!(records);

        let mut written = 0;
        while let Some(record) = records.try_next().await? {
            let document = self.assembler.assemble(&definition.doc_type, &record).await?;
            self.sink.store(document).await?;
            written += 1;

            if self.config.show_progress {
                match total {
                    Some(total) => info!(progress = %format!("{written}/{total}"), "Progress"),
                    None => info!(written, "Progress"),
                }
            }
        }

        Ok(written)
    }
}
