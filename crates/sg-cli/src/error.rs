//! Command errors and their exit codes.

use crate::config::ConfigError;
use crate::exit_codes::ExitCode;
use sg_bundle::BundleError;
use sg_client::ClientError;
use std::path::PathBuf;
use thiserror::Error;

/// Any failure a command can report.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Invalid(#[from] sg_common::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a website document: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid arguments: {0}")]
    Args(String),

    #[error("{} file(s) failed verification: {}", .0.len(), .0.join(", "))]
    VerificationFailed(Vec<String>),

    #[error("cannot serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Config(ConfigError::IoError { .. }) => ExitCode::IoError,
            CliError::Config(_) => ExitCode::ConfigError,
            CliError::Bundle(err) => match err {
                BundleError::Io(_) => ExitCode::IoError,
                BundleError::FileNotFound(_) => ExitCode::NotFound,
                BundleError::EmptyBundle => ExitCode::ArgsError,
                _ => ExitCode::IntegrityError,
            },
            CliError::Client(err) => match err {
                ClientError::NotFound(_) => ExitCode::NotFound,
                ClientError::InvalidRequest(_) | ClientError::Invalid(_) => ExitCode::ArgsError,
                ClientError::Status { .. } | ClientError::Transport(_) | ClientError::Decode(_) => {
                    ExitCode::RemoteError
                }
            },
            CliError::Invalid(_) | CliError::Input { .. } | CliError::Args(_) => {
                ExitCode::ArgsError
            }
            CliError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ExitCode::NotFound
            }
            CliError::Read { .. } | CliError::Write { .. } => ExitCode::IoError,
            CliError::VerificationFailed(_) => ExitCode::IntegrityError,
            CliError::Output(_) => ExitCode::InternalError,
        }
    }
}

/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, CliError>;
