//! Composer configuration types.

use serde::{Deserialize, Serialize};

/// How bundle text is interpolated into the document shell.
///
/// Bundles normally come from a single trusted generation service and are
/// embedded verbatim. `Untrusted` escapes the title and keeps style/script
/// content from closing its element early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Verbatim interpolation.
    #[default]
    Trusted,
    /// Escape title, guard `</style` and `</script` sequences.
    Untrusted,
}

impl EscapeMode {
    /// Whether content is escaped before interpolation.
    pub fn escapes(&self) -> bool {
        matches!(self, EscapeMode::Untrusted)
    }
}

impl std::str::FromStr for EscapeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trusted" | "verbatim" => Ok(EscapeMode::Trusted),
            "untrusted" | "escape" => Ok(EscapeMode::Untrusted),
            _ => Err(format!("unknown escape mode: {}", s)),
        }
    }
}

impl std::fmt::Display for EscapeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapeMode::Trusted => write!(f, "trusted"),
            EscapeMode::Untrusted => write!(f, "untrusted"),
        }
    }
}

/// Complete composer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Interpolation mode for bundle text.
    #[serde(default)]
    pub escape_mode: EscapeMode,
    /// Value of the `lang` attribute on `<html>`.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Title of the packaged `index.html`.
    #[serde(default = "default_download_title")]
    pub download_title: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_download_title() -> String {
    "Generated Website".to_string()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::default(),
            lang: default_lang(),
            download_title: default_download_title(),
        }
    }
}

impl ComposerConfig {
    /// Create a new composer configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the escape mode.
    pub fn with_escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Set the document language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the packaged document title.
    pub fn with_download_title(mut self, title: impl Into<String>) -> Self {
        self.download_title = title.into();
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
