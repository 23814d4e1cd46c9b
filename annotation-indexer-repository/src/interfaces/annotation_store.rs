//! Annotation store trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreError;
use crate::types::{ResultPage, SearchSession, SessionInfo};
use annotation_indexer_shared::Query;

/// Read-only access to a paginated, session-based annotation search API.
///
/// One session is opened per distinct query; pages are then read from that
/// session by their page token.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Open a search session for `query`.
    async fn open_search(&self, query: &Query) -> Result<SearchSession, StoreError>;

    /// Read the server-side information about a session, including the hit
    /// count when the store has already computed it.
    async fn read_session_info(&self, session: &SearchSession) -> Result<SessionInfo, StoreError>;

    /// Read one page of a session's results.
    ///
    /// # Arguments
    ///
    /// * `session` - The session returned by `open_search`
    /// * `page` - The page token, `"0"` for the first page
    async fn read_page(&self, session: &SearchSession, page: &str)
        -> Result<ResultPage, StoreError>;

    /// Describe the store (server name, version, ...).
    async fn about(&self) -> Result<Value, StoreError>;
}
