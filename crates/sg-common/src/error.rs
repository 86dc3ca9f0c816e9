//! Error types shared across sitegen crates.

use thiserror::Error;

/// Result type alias for common operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or decoding shared types.
#[derive(Error, Debug)]
pub enum Error {
    /// A value failed validation before being sent anywhere.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
