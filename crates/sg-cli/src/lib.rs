//! Support library for the `sitegen` binary.
//!
//! Holds everything the command handlers share: configuration resolution,
//! logging setup, input decoding, the error type and its exit codes.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod input;
pub mod logging;

pub use error::{CliError, Result};
pub use exit_codes::ExitCode;
