//! Pipeline error types.

use thiserror::Error;

use annotation_indexer_repository::{SearchIndexError, StoreError};

/// Errors that abort an indexing run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The annotation store could not be read.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// A search index request failed.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// Deleting or recreating the destination index failed.
    #[error("Failed to reset index {index}: {source}")]
    IndexResetError {
        index: String,
        #[source]
        source: SearchIndexError,
    },

    /// A record has no usable identifier at the configured path.
    #[error("Record has no identifier at {path}")]
    MissingIdentifier { path: String },

    /// An overlap facet was requested for a record without an anchor target.
    #[error("Record {doc_id} has no {anchor_type} target with a selector")]
    MissingAnchor { doc_id: String, anchor_type: String },

    /// The search index did not acknowledge a write as a creation.
    #[error("Write of {doc_id} was not acknowledged as created (result: {result})")]
    WriteRejected { doc_id: String, result: String },

    /// The run was interrupted before it completed.
    #[error("Indexing run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Create an index reset error.
    pub fn index_reset(index: impl Into<String>, source: SearchIndexError) -> Self {
        Self::IndexResetError {
            index: index.into(),
            source,
        }
    }

    /// Create a missing identifier error.
    pub fn missing_identifier(path: impl Into<String>) -> Self {
        Self::MissingIdentifier { path: path.into() }
    }

    /// Create a missing anchor error.
    pub fn missing_anchor(doc_id: impl Into<String>, anchor_type: impl Into<String>) -> Self {
        Self::MissingAnchor {
            doc_id: doc_id.into(),
            anchor_type: anchor_type.into(),
        }
    }

    /// Create a write rejected error.
    pub fn write_rejected(doc_id: impl Into<String>, result: impl Into<String>) -> Self {
        Self::WriteRejected {
            doc_id: doc_id.into(),
            result: result.into(),
        }
    }
}
