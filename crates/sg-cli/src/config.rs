//! Configuration loading for the sitegen CLI.
//!
//! Resolution order (highest to lowest priority):
//! 1. `--config <file>` (or `SITEGEN_CONFIG`, read by the flag)
//! 2. `$XDG_CONFIG_HOME/sitegen/config.json`
//! 3. Built-in defaults
//!
//! `--api-url` (or `SITEGEN_API_URL`) overrides the API URL of whichever
//! source won.

use serde::{Deserialize, Serialize};
use sg_compose::ComposerConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "sitegen";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitegenConfig {
    /// Config file schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Base URL of the generation and project API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Document composer settings.
    #[serde(default)]
    pub composer: ComposerConfig,
}

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SitegenConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            composer: ComposerConfig::default(),
        }
    }
}

impl SitegenConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check version compatibility and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::VersionMismatch {
                expected: CONFIG_SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got {:?}",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
    /// API URL override.
    pub api_url: Option<String>,
    /// Config home directory; `None` uses the XDG default.
    pub config_home: Option<PathBuf>,
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Effective settings.
    pub config: SitegenConfig,
    /// File the settings came from (None if using defaults).
    pub source: Option<PathBuf>,
    /// Whether the API URL came from a flag or environment variable.
    pub api_url_overridden: bool,
}

/// Default config home: `$XDG_CONFIG_HOME`, else `~/.config`.
pub fn default_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        })
}

/// Load configuration with the standard resolution order.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let (mut config, source) = match &options.config_path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound { path: path.clone() });
            }
            (load_config_file(path)?, Some(path.clone()))
        }
        None => {
            let home = options
                .config_home
                .clone()
                .unwrap_or_else(default_config_home);
            let path = home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if path.exists() {
                (load_config_file(&path)?, Some(path))
            } else {
                debug!(path = %path.display(), "No config file, using defaults");
                (SitegenConfig::default(), None)
            }
        }
    };

    let api_url_overridden = options.api_url.is_some();
    if let Some(url) = &options.api_url {
        config.api_url = url.clone();
    }

    config.validate()?;

    Ok(ResolvedConfig {
        config,
        source,
        api_url_overridden,
    })
}

/// Read and parse one config file.
pub fn load_config_file(path: &Path) -> Result<SitegenConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Config file loaded");
    Ok(config)
}
