//! Error types for the booking client

use thiserror::Error;

/// Errors that can occur when talking to the remote booking service
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service rejected the request with a human-readable reason
    ///
    /// The reason is surfaced to the user verbatim (wrong credentials,
    /// seat no longer available, and so on).
    #[error("{reason}")]
    Rejected {
        /// Server-provided reason
        reason: String,
    },

    /// Response body could not be decoded
    #[error("Response decoding failed: {0}")]
    DecodeFailed(String),
}

/// Errors that can occur while persisting the session record
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Filesystem operation failed
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Session record could not be encoded
    #[error("Session encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
