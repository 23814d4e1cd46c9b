//! Text source trait definition.

use async_trait::async_trait;

use crate::errors::TextFetchError;

/// Fetches the raw text a selector-less target points at.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Fetch the text behind `uri`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The text content
    /// * `Err(TextFetchError::StatusError)` - If the source answered with a non-2xx status
    /// * `Err(TextFetchError)` - If the request or decoding fails
    async fn fetch_text(&self, uri: &str) -> Result<String, TextFetchError>;
}
