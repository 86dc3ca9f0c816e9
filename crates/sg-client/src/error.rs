//! Error types for remote operations.

use thiserror::Error;

/// Errors returned by generation services and project stores.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The requested project does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other non-success HTTP status.
    #[error("service returned HTTP {code}: {detail}")]
    Status { code: u16, detail: String },

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Payload rejected before sending.
    #[error(transparent)]
    Invalid(#[from] sg_common::Error),
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, ClientError>;
