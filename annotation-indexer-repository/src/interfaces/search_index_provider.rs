//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::WriteResult;

/// Abstracts the destination search index.
///
/// This trait is deliberately narrow: index lifecycle plus single-document
/// writes. Implementations are injected into the pipeline's index sink to
/// enable easy testing with mock implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the named index exists.
    async fn index_exists(&self, name: &str) -> Result<bool, SearchIndexError>;

    /// Delete the named index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(SearchIndexError::IndexDeletionError)` - If the deletion fails
    async fn delete_index(&self, name: &str) -> Result<(), SearchIndexError>;

    /// Create the named index from a settings and mappings body.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchIndexError::IndexCreationError)` - If creation fails
    async fn create_index(&self, name: &str, mapping: &Value) -> Result<(), SearchIndexError>;

    /// Write `document` under `id`, replacing any existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(WriteResult)` - The outcome the engine reported (`created`, `updated`, ...)
    /// * `Err(SearchIndexError)` - If the request fails or is rejected
    async fn upsert(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<WriteResult, SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
