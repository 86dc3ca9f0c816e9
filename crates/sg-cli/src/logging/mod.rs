//! Structured logging for the sitegen CLI.
//!
//! - stdout is reserved for command payloads (documents, JSON, summaries)
//! - stderr receives all log output, human-readable or JSON lines

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events pass the filter.
const LOG_TARGETS: [&str; 6] = [
    "sitegen",
    "sg_cli",
    "sg_compose",
    "sg_bundle",
    "sg_client",
    "sg_common",
];

/// Filter directives enabling `level` for every sitegen crate.
pub fn filter_directives(level: LogLevel) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::new(filter_directives(config.level));

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives(LogLevel::Debug);
        assert!(directives.starts_with("sitegen=debug,"));
        assert!(directives.contains("sg_compose=debug"));
        assert_eq!(directives.split(',').count(), LOG_TARGETS.len());
    }

    #[test]
    fn test_filter_directives_parse() {
        for level in [LogLevel::Trace, LogLevel::Info, LogLevel::Off] {
            assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
        }
    }
}
