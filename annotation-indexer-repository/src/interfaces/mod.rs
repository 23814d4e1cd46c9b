//! Interface definitions for the indexer's external collaborators.
//!
//! These traits allow for dependency injection and swappable backends, so the
//! pipeline can be driven against mocks in tests.

mod annotation_store;
mod search_index_provider;
mod text_source;

pub use annotation_store::AnnotationStore;
pub use search_index_provider::SearchIndexProvider;
pub use text_source::TextSource;
