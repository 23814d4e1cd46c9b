//! # Annotation Indexer
//!
//! Main library for the annotation indexer.
//!
//! This crate provides the command line, the YAML configuration, logging
//! setup and the wiring that turns them into a ready-to-run pipeline.

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::Cli;
pub use config::{Dependencies, IndexerConfig};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] annotation_indexer_pipeline::PipelineError),

    /// Annotation store error.
    #[error("Store error: {0}")]
    StoreError(#[from] annotation_indexer_repository::StoreError),

    /// Search index error.
    #[error("Search error: {0}")]
    SearchError(#[from] annotation_indexer_repository::SearchIndexError),

    /// Text source setup error.
    #[error("Text source error: {0}")]
    TextError(#[from] annotation_indexer_repository::TextFetchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
