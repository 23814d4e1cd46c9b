//! Text fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching raw text for a view.
#[derive(Debug, Clone, Error)]
pub enum TextFetchError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The text source answered with a non-success status.
    #[error("Text source responded with status {0}")]
    StatusError(u16),

    /// The body could not be read as text.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl TextFetchError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}
