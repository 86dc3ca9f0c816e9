//! Download packaging.
//!
//! A bundle is offered for download as three files, always in this order:
//! the standalone `index.html`, then `styles.css`, then `script.js`.

use crate::config::ComposerConfig;
use crate::normalize::normalize;
use crate::preview::render_document;

use serde::{Deserialize, Serialize};
use sg_common::WebsiteBundle;
use tracing::debug;

/// File name of the combined document.
pub const INDEX_FILE: &str = "index.html";
/// File name of the standalone stylesheet.
pub const STYLES_FILE: &str = "styles.css";
/// File name of the standalone script.
pub const SCRIPT_FILE: &str = "script.js";

/// Shell markup around the inlined stylesheet and script.
const STYLE_OPEN: &str = "<style>";
const STYLE_CLOSE: &str = "</style>\n</head>\n<body>\n";
const SCRIPT_OPEN: &str = "<script>";
const SCRIPT_CLOSE: &str = "</script>\n</body>\n</html>";

/// One downloadable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// File name offered to the user.
    pub filename: String,
    /// Text content.
    pub content: String,
    /// MIME type of the content.
    pub mime_type: String,
}

impl Artifact {
    /// Create a new artifact.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Content size in bytes.
    pub fn bytes(&self) -> usize {
        self.content.len()
    }
}

/// The ordered set of files produced for one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DownloadPackage {
    /// Artifacts in the order they are offered for saving.
    pub files: Vec<Artifact>,
}

impl DownloadPackage {
    /// Look an artifact up by file name.
    pub fn get(&self, filename: &str) -> Option<&Artifact> {
        self.files.iter().find(|a| a.filename == filename)
    }

    /// File names in offer order.
    pub fn filenames(&self) -> Vec<&str> {
        self.files.iter().map(|a| a.filename.as_str()).collect()
    }

    /// Total content size in bytes.
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(Artifact::bytes).sum()
    }

    /// Text of the `<style>` element inside `index.html`.
    ///
    /// The block is found by its position in the document shell, matching
    /// `styles.css` first. When the inlined copy differs from `styles.css`
    /// (untrusted mode), the first `</style>` that closes the head ends it,
    /// so stylesheet text containing that exact markup shifts the match.
    pub fn inlined_style(&self) -> Option<&str> {
        let content = &self.get(INDEX_FILE)?.content;
        let standalone = &self.get(STYLES_FILE)?.content;

        let exact = format!("{STYLE_OPEN}{standalone}{STYLE_CLOSE}");
        if let Some(at) = content.find(&exact) {
            let start = at + STYLE_OPEN.len();
            return Some(&content[start..start + standalone.len()]);
        }

        let end = content.find(STYLE_CLOSE)?;
        let start = content[..end].rfind(STYLE_OPEN)? + STYLE_OPEN.len();
        Some(&content[start..end])
    }

    /// Text of the `<script>` element closing `index.html`.
    ///
    /// The block is found from the end of the document shell, matching
    /// `script.js` first. When the inlined copy differs from `script.js`
    /// (untrusted mode), the last `<script>` opens it, so script text
    /// containing that exact markup shifts the match.
    pub fn inlined_script(&self) -> Option<&str> {
        let content = &self.get(INDEX_FILE)?.content;
        let standalone = &self.get(SCRIPT_FILE)?.content;
        let before = content.strip_suffix(SCRIPT_CLOSE)?;

        if let Some(head) = before.strip_suffix(standalone.as_str()) {
            if head.ends_with(SCRIPT_OPEN) {
                return Some(&before[head.len()..]);
            }
        }

        let start = before.rfind(SCRIPT_OPEN)? + SCRIPT_OPEN.len();
        Some(&before[start..])
    }
}

/// Produces the downloadable file set for a bundle.
#[derive(Debug, Clone, Default)]
pub struct BundlePackager {
    config: ComposerConfig,
}

impl BundlePackager {
    /// Create a packager with configuration.
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Build the three download artifacts.
    ///
    /// The standalone document carries the configured placeholder title
    /// rather than the bundle title.
    pub fn package(&self, bundle: &WebsiteBundle) -> DownloadPackage {
        let body = normalize(&bundle.html);
        let index = render_document(
            &self.config,
            &self.config.download_title,
            &bundle.css,
            &body,
            &bundle.js,
        );

        let package = DownloadPackage {
            files: vec![
                Artifact::new(INDEX_FILE, index, "text/html"),
                Artifact::new(STYLES_FILE, bundle.css.clone(), "text/css"),
                Artifact::new(SCRIPT_FILE, bundle.js.clone(), "text/javascript"),
            ],
        };

        debug!(
            files = package.files.len(),
            bytes = package.total_bytes(),
            "Download package built"
        );

        package
    }
}
