//! Website bundle and generation payload types.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// The unit of data flowing through the composer.
///
/// All four fields are opaque text. Absent or `null` fields decode as empty
/// strings, since an empty stylesheet or script still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteBundle {
    /// Display title, used verbatim in the preview `<title>`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Body content, possibly carrying stray document-level tags.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
    /// Style rules, inserted verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub css: String,
    /// Script statements, inserted verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub js: String,
}

impl WebsiteBundle {
    /// Create a bundle from its four parts.
    pub fn new(
        title: impl Into<String>,
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Decode a bundle from any JSON document carrying the bundle fields.
    ///
    /// Generation responses and saved projects both qualify; extra fields
    /// are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total size of the three code strings in bytes.
    pub fn code_bytes(&self) -> usize {
        self.html.len() + self.css.len() + self.js.len()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One generated page section (navigation, hero, gallery, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Section kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Section markup.
    #[serde(default)]
    pub html: String,
    /// Section styles.
    #[serde(default)]
    pub css: String,
    /// Section script, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
}

/// Request sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Natural-language description of the website.
    pub prompt: String,
    /// Design style id.
    #[serde(default = "default_style")]
    pub style: String,
    /// Color scheme id.
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,
}

fn default_style() -> String {
    "modern".to_string()
}

fn default_color_scheme() -> String {
    "default".to_string()
}

impl GenerateRequest {
    /// Create a request with the default style and color scheme.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: default_style(),
            color_scheme: default_color_scheme(),
        }
    }

    /// Set the design style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the color scheme.
    pub fn with_color_scheme(mut self, color_scheme: impl Into<String>) -> Self {
        self.color_scheme = color_scheme.into();
        self
    }

    /// Reject requests the service would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::InvalidInput("prompt is empty".to_string()));
        }
        if self.style.trim().is_empty() {
            return Err(Error::InvalidInput("style is empty".to_string()));
        }
        if self.color_scheme.trim().is_empty() {
            return Err(Error::InvalidInput("color scheme is empty".to_string()));
        }
        Ok(())
    }
}

/// Response of the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedWebsite {
    /// Server-side id, when the service assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title and code.
    #[serde(flatten)]
    pub bundle: WebsiteBundle,
    /// Sections the page was assembled from.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Generated meta description.
    #[serde(default)]
    pub meta_description: String,
    /// Prompt the website was generated from.
    #[serde(default)]
    pub prompt: String,
    /// Design style used.
    #[serde(default)]
    pub style: String,
    /// Color scheme used.
    #[serde(default)]
    pub color_scheme: String,
}

impl GeneratedWebsite {
    /// Borrow the composable part of the response.
    pub fn bundle(&self) -> &WebsiteBundle {
        &self.bundle
    }

    /// Website title.
    pub fn title(&self) -> &str {
        &self.bundle.title
    }
}
