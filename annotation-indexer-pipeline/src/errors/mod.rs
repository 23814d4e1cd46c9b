//! Error types for the annotation indexer pipeline.

mod pipeline_error;

pub use pipeline_error::PipelineError;
