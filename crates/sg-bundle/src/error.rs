//! Error types for artifact operations.

use thiserror::Error;

/// Errors that can occur while writing or reading artifacts.
#[derive(Error, Debug)]
pub enum BundleError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Checksum verification failed
    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Missing required file in archive
    #[error("missing required file: {0}")]
    MissingFile(String),

    /// File not listed in the manifest
    #[error("file not found in archive: {0}")]
    FileNotFound(String),

    /// Unknown or unsupported archive version
    #[error("unsupported archive version: {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    /// Corrupted manifest
    #[error("corrupted manifest: {0}")]
    CorruptedManifest(String),

    /// Artifact is not valid UTF-8 text
    #[error("artifact '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    /// Nothing to write
    #[error("package has no artifacts to write")]
    EmptyBundle,
}

/// Result type alias for artifact operations.
pub type Result<T> = std::result::Result<T, BundleError>;
