//! Document composer for generated websites.
//!
//! Turns a [`WebsiteBundle`] (title, HTML fragment, CSS, JS) into either a
//! single previewable document or a set of downloadable files. Every
//! operation is a pure, synchronous string transform: no I/O, no shared
//! state, safe to call from any number of threads.
//!
//! # Components
//!
//! - **Fragment normalizer**: strips stray `<!DOCTYPE>`, `<html>`, `<head>` and
//!   `<body>` wrappers so a fragment can be re-embedded
//! - **Preview composer**: builds the document for an isolated, sandboxed
//!   rendering surface
//! - **Bundle packager**: builds `index.html`, `styles.css` and `script.js`
//! - **Code statistics**: byte and line counts per code kind
//!
//! # Trust boundary
//!
//! By default the title, CSS and JS are interpolated verbatim: bundles are
//! assumed to come from a single trusted generation service. A title
//! containing `</title>` or a script containing `</script>` can break out of
//! its element. [`EscapeMode::Untrusted`] escapes the title and guards those
//! closing sequences instead.
//!
//! # Example
//!
//! ```
//! use sg_common::WebsiteBundle;
//! use sg_compose::{compose_preview, package_for_download};
//!
//! let bundle = WebsiteBundle::new("My Site", "<body><h1>Hi</h1></body>", "h1{color:red}", "");
//! let html = compose_preview(&bundle);
//! assert!(html.contains("<title>My Site</title>"));
//!
//! let package = package_for_download(&bundle);
//! assert_eq!(package.filenames(), vec!["index.html", "styles.css", "script.js"]);
//! ```

pub mod config;
pub mod escape;
pub mod normalize;
pub mod package;
pub mod preview;
pub mod stats;

pub use config::{ComposerConfig, EscapeMode};
pub use normalize::{has_wrapper_tags, normalize};
pub use package::{Artifact, BundlePackager, DownloadPackage};
pub use preview::{PreviewComposer, PreviewFrame, PreviewSurface, Viewport};
pub use stats::{BundleStats, CodeKind, CodeStats};

use sg_common::WebsiteBundle;

/// Compose a preview document with the default configuration.
pub fn compose_preview(bundle: &WebsiteBundle) -> String {
    PreviewComposer::default().compose(bundle)
}

/// Package a bundle for download with the default configuration.
pub fn package_for_download(bundle: &WebsiteBundle) -> DownloadPackage {
    BundlePackager::default().package(bundle)
}
