//! # Annotation Indexer Pipeline
//!
//! This crate provides the pipeline components for reading annotation records
//! from an AnnoRepo container and indexing them as search documents.
//!
//! ## Architecture
//!
//! The pipeline follows a Cursor-Assembler-Sink pattern:
//!
//! 1. **Cursor**: Walks the pages of one search session
//! 2. **Assembler**: Turns a record into a search document, module by module,
//!    using the facet **extractors** for overlap-based facets
//! 3. **Loader**: Resets the index and writes documents into it
//! 4. **Orchestrator**: Coordinates the pipeline flow per document type

pub mod assembler;
pub mod cursor;
pub mod errors;
pub mod extractors;
pub mod loader;
pub mod orchestrator;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::{AssemblerSettings, DatePaths, DocumentAssembler, ViewDefinition};
pub use cursor::PagedResultCursor;
pub use errors::PipelineError;
pub use loader::IndexSink;
pub use orchestrator::{DocumentDefinition, Orchestrator, OrchestratorConfig, RunSummary};
pub use query::OverlapQueryBuilder;
