//! Assembler module for the annotation indexer pipeline.
//!
//! Transforms top-tier records into search documents.

mod document_assembler;
mod settings;

pub use document_assembler::DocumentAssembler;
pub use settings::{AssemblerSettings, DatePaths, ViewDefinition};
