//! Annotation store error types.
//!
//! This module defines the errors that can occur while talking to the
//! annotation store's search API.

use thiserror::Error;

/// Errors that can occur during annotation store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The request never produced a response (connection, timeout, body read).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The store answered with a non-success status.
    #[error("Store responded with status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response did not have the expected shape.
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl StoreError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::ProtocolError(msg.into())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
