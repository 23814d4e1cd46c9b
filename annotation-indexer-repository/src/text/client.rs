//! Plain HTTP text fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::errors::TextFetchError;
use crate::interfaces::TextSource;

/// Timeout applied to every text fetch.
pub const DEFAULT_TEXT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches text with a plain HTTP GET.
pub struct HttpTextSource {
    http: Client,
}

impl HttpTextSource {
    /// Create a text source with the default timeout.
    pub fn new() -> Result<Self, TextFetchError> {
        Self::with_timeout(DEFAULT_TEXT_TIMEOUT)
    }

    /// Create a text source with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TextFetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextFetchError::transport(e.to_string()))?;
        Ok(Self { http })
    }
}

/// Turn a text body into plain text.
///
/// Legacy view text is served as a JSON array of string fragments, which are
/// concatenated without separator. Any other body is returned as is.
pub fn decode_text(body: &str) -> String {
    match serde_json::from_str::<Vec<String>>(body) {
        Ok(fragments) => fragments.concat(),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl TextSource for HttpTextSource {
    async fn fetch_text(&self, uri: &str) -> Result<String, TextFetchError> {
        let response = self
            .http
            .get(uri)
            .send()
            .await
            .map_err(|e| TextFetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextFetchError::StatusError(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TextFetchError::decode(e.to_string()))?;

        trace!(uri = %uri, bytes = body.len(), "Fetched text");
        Ok(decode_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fragment_array() {
        assert_eq!(decode_text(r#"["Dear ", "Sir,", " greetings"]"#), "Dear Sir, greetings");
    }

    #[test]
    fn test_decode_raw_text() {
        assert_eq!(decode_text("Dear Sir"), "Dear Sir");
        assert_eq!(decode_text(r#"{"text": "x"}"#), r#"{"text": "x"}"#);
    }
}
