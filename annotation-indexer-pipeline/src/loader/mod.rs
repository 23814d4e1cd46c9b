//! Loader module for the annotation indexer pipeline.
//!
//! Writes assembled documents into the destination search index.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::errors::PipelineError;
use annotation_indexer_repository::SearchIndexProvider;
use annotation_indexer_shared::Document;

/// Sink that owns one destination index.
///
/// The sink is responsible for:
/// - Recreating the index from a mapping before a run
/// - Writing each document under its id, accepting only first writes
pub struct IndexSink {
    provider: Arc<dyn SearchIndexProvider>,
    index: String,
}

impl IndexSink {
    /// Create a sink writing into `index`.
    pub fn new(provider: Arc<dyn SearchIndexProvider>, index: impl Into<String>) -> Self {
        Self {
            provider,
            index: index.into(),
        }
    }

    /// The destination index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Delete the index if it exists, then create it from `mapping`.
    ///
    /// Any failure is fatal: nothing should be written into a half-reset
    /// index.
    #[instrument(skip(self, mapping), fields(index = %self.index))]
    pub async fn reset_index(&self, mapping: &Value) -> Result<(), PipelineError> {
        let exists = self
            .provider
            .index_exists(&self.index)
            .await
            .map_err(|e| PipelineError::index_reset(&self.index, e))?;

        if exists {
            self.provider
                .delete_index(&self.index)
                .await
                .map_err(|e| PipelineError::index_reset(&self.index, e))?;
            info!("Deleted existing index");
        }

        self.provider
            .create_index(&self.index, mapping)
            .await
            .map_err(|e| PipelineError::index_reset(&self.index, e))?;

        info!("Created index");
        Ok(())
    }

    /// Write `document` under its id.
    ///
    /// The write only counts as successful when the index reports the
    /// document as newly created; within one run every id is written once,
    /// so any other outcome means the run is inconsistent.
    pub async fn store(&self, document: Document) -> Result<(), PipelineError> {
        let result = self
            .provider
            .upsert(&self.index, document.id(), &document.to_body())
            .await?;

        if !result.is_created() {
            error!(doc_id = %document.id(), result = %result, "Index did not create document");
            return Err(PipelineError::write_rejected(document.id(), result.as_str()));
        }

        info!(doc_id = %document.id(), "Indexed document");
        Ok(())
    }

    /// Whether the search cluster behind the sink is healthy.
    pub async fn health_check(&self) -> Result<bool, PipelineError> {
        Ok(self.provider.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockIndex;
    use annotation_indexer_repository::WriteResult;
    use serde_json::json;

    #[tokio::test]
    async fn test_reset_creates_missing_index() {
        let index = Arc::new(MockIndex::new());
        let sink = IndexSink::new(index.clone(), "letters");

        sink.reset_index(&json!({})).await.unwrap();

        assert_eq!(index.calls(), vec!["exists letters", "create letters"]);
    }

    #[tokio::test]
    async fn test_reset_replaces_existing_index() {
        let index = Arc::new(MockIndex::new().existing());
        let sink = IndexSink::new(index.clone(), "letters");

        sink.reset_index(&json!({})).await.unwrap();

        assert_eq!(
            index.calls(),
            vec!["exists letters", "delete letters", "create letters"]
        );
    }

    #[tokio::test]
    async fn test_reset_failure_is_fatal() {
        let index = Arc::new(MockIndex::new().failing_create());
        let sink = IndexSink::new(index, "letters");

        assert!(matches!(
            sink.reset_index(&json!({})).await,
            Err(PipelineError::IndexResetError { .. })
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let sink = IndexSink::new(Arc::new(MockIndex::new()), "letters");
        assert!(sink.health_check().await.unwrap());

        let sink = IndexSink::new(Arc::new(MockIndex::new().unhealthy()), "letters");
        assert!(!sink.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_document() {
        let index = Arc::new(MockIndex::new());
        let sink = IndexSink::new(index.clone(), "letters");
        let mut doc = Document::new("letter-42");
        doc.insert("type", "letter");

        sink.store(doc).await.unwrap();

        let writes = index.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], ("letter-42".to_string(), json!({ "type": "letter" })));
    }

    #[tokio::test]
    async fn test_update_is_rejected() {
        let index = Arc::new(MockIndex::new().answer("letter-42", WriteResult::Updated));
        let sink = IndexSink::new(index, "letters");

        let result = sink.store(Document::new("letter-42")).await;

        assert!(matches!(
            result,
            Err(PipelineError::WriteRejected { result, .. }) if result == "updated"
        ));
    }
}
