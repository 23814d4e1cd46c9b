//! # Annotation Indexer Repository
//!
//! This crate provides the narrow interfaces the indexer uses to talk to its
//! external collaborators, together with concrete implementations:
//!
//! - [`AnnotationStore`]: paginated search sessions on an AnnoRepo container
//! - [`TextSource`]: raw text behind a target's `source` URI
//! - [`SearchIndexProvider`]: index lifecycle and document writes on
//!   OpenSearch / Elasticsearch

pub mod annorepo;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod text;
pub mod types;

pub use annorepo::AnnoRepoClient;
pub use errors::{SearchIndexError, StoreError, TextFetchError};
pub use interfaces::{AnnotationStore, SearchIndexProvider, TextSource};
pub use opensearch::OpenSearchClient;
pub use text::HttpTextSource;
pub use types::{ResultPage, SearchSession, SessionInfo, WriteResult};
