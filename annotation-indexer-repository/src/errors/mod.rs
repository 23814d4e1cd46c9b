//! Error types for the annotation indexer repository.

mod search_index_error;
mod store_error;
mod text_fetch_error;

pub use search_index_error::SearchIndexError;
pub use store_error::StoreError;
pub use text_fetch_error::TextFetchError;
