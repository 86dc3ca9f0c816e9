//! Code size statistics for the inspection view.

use serde::{Deserialize, Serialize};
use sg_common::WebsiteBundle;

/// The three code kinds of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Html,
    Css,
    Js,
}

impl CodeKind {
    /// All kinds, in tab order.
    pub const ALL: [CodeKind; 3] = [CodeKind::Html, CodeKind::Css, CodeKind::Js];

    /// Tab label.
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeKind::Html => "HTML",
            CodeKind::Css => "CSS",
            CodeKind::Js => "JavaScript",
        }
    }

    /// Syntax highlighting language id.
    pub fn language(&self) -> &'static str {
        match self {
            CodeKind::Html => "html",
            CodeKind::Css => "css",
            CodeKind::Js => "javascript",
        }
    }

    /// The bundle text of this kind.
    pub fn select<'a>(&self, bundle: &'a WebsiteBundle) -> &'a str {
        match self {
            CodeKind::Html => &bundle.html,
            CodeKind::Css => &bundle.css,
            CodeKind::Js => &bundle.js,
        }
    }
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Size of one code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStats {
    /// UTF-8 length in bytes.
    pub bytes: usize,
    /// Number of `\n`-separated lines; empty text counts as one line.
    pub lines: usize,
}

impl CodeStats {
    /// Measure a code string.
    pub fn of(code: &str) -> Self {
        Self {
            bytes: code.len(),
            lines: code.split('\n').count(),
        }
    }

    /// Human-readable size: bytes under 1 KiB, otherwise KiB with two decimals.
    pub fn size_label(&self) -> String {
        if self.bytes < 1024 {
            format!("{} B", self.bytes)
        } else {
            format!("{:.2} KB", self.bytes as f64 / 1024.0)
        }
    }
}

/// Sizes of all three code strings of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleStats {
    pub html: CodeStats,
    pub css: CodeStats,
    pub js: CodeStats,
}

impl BundleStats {
    /// Measure a bundle.
    pub fn of(bundle: &WebsiteBundle) -> Self {
        Self {
            html: CodeStats::of(&bundle.html),
            css: CodeStats::of(&bundle.css),
            js: CodeStats::of(&bundle.js),
        }
    }

    /// Stats for one code kind.
    pub fn get(&self, kind: CodeKind) -> CodeStats {
        match kind {
            CodeKind::Html => self.html,
            CodeKind::Css => self.css,
            CodeKind::Js => self.js,
        }
    }

    /// Combined size in bytes.
    pub fn total_bytes(&self) -> usize {
        self.html.bytes + self.css.bytes + self.js.bytes
    }
}
