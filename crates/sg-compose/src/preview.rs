//! Preview document composition.

use crate::config::{ComposerConfig, EscapeMode};
use crate::escape::{guard_raw_text, html_escape};
use crate::normalize::normalize;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sg_common::WebsiteBundle;
use std::borrow::Cow;
use tracing::debug;

/// Sandbox flags for the isolated rendering surface.
pub const SANDBOX_FLAGS: &str = "allow-scripts allow-same-origin";

/// Height of the embedded preview frame.
const FRAME_HEIGHT: &str = "600px";

/// Render the document shell shared by preview and download.
///
/// `body` must already be normalized.
pub(crate) fn render_document(
    config: &ComposerConfig,
    title: &str,
    css: &str,
    body: &str,
    js: &str,
) -> String {
    let (title, css, js) = match config.escape_mode {
        EscapeMode::Trusted => (Cow::Borrowed(title), Cow::Borrowed(css), Cow::Borrowed(js)),
        EscapeMode::Untrusted => (
            Cow::Owned(html_escape(title)),
            guard_raw_text(css, "style"),
            guard_raw_text(js, "script"),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{body}
    <script>{js}</script>
</body>
</html>"#,
        lang = html_escape(&config.lang),
    )
}

/// Composes a bundle into one renderable HTML document.
#[derive(Debug, Clone, Default)]
pub struct PreviewComposer {
    config: ComposerConfig,
}

impl PreviewComposer {
    /// Create a composer with configuration.
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Build the complete preview document for a bundle.
    pub fn compose(&self, bundle: &WebsiteBundle) -> String {
        let body = normalize(&bundle.html);
        let html = render_document(&self.config, &bundle.title, &bundle.css, &body, &bundle.js);

        debug!(
            bytes = html.len(),
            title = %bundle.title,
            normalized = matches!(body, Cow::Owned(_)),
            "Preview composed"
        );

        html
    }
}

/// Width presets for the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Full available width.
    #[default]
    Desktop,
    /// 768px wide.
    Tablet,
    /// 375px wide.
    Mobile,
}

impl Viewport {
    /// CSS width of the surface.
    pub fn width(&self) -> &'static str {
        match self {
            Viewport::Desktop => "100%",
            Viewport::Tablet => "768px",
            Viewport::Mobile => "375px",
        }
    }
}

impl std::str::FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(Viewport::Desktop),
            "tablet" => Ok(Viewport::Tablet),
            "mobile" | "phone" => Ok(Viewport::Mobile),
            _ => Err(format!("unknown viewport: {}", s)),
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewport::Desktop => write!(f, "desktop"),
            Viewport::Tablet => write!(f, "tablet"),
            Viewport::Mobile => write!(f, "mobile"),
        }
    }
}

/// One composed document, tagged with the render target it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    /// Identity of the render target. A new key means a full reload.
    pub render_key: u64,
    /// Complete HTML document.
    pub html: String,
}

impl PreviewFrame {
    /// `data:` URL carrying the document, for surfaces loaded by URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:text/html;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(self.html.as_bytes())
        )
    }

    /// Sandboxed `<iframe>` embedding the document through `srcdoc`.
    pub fn iframe_tag(&self, viewport: Viewport) -> String {
        format!(
            r#"<iframe id="preview-iframe" data-render-key="{key}" title="Website Preview" sandbox="{sandbox}" style="width: {width}; height: {height}; border: 0" srcdoc="{srcdoc}"></iframe>"#,
            key = self.render_key,
            sandbox = SANDBOX_FLAGS,
            width = viewport.width(),
            height = FRAME_HEIGHT,
            srcdoc = html_escape(&self.html),
        )
    }
}

/// Locally-owned render state of one isolated preview surface.
///
/// Every load yields a fresh render key so the embedded script runs from
/// scratch; the surface is never patched in place.
#[derive(Debug, Default)]
pub struct PreviewSurface {
    composer: PreviewComposer,
    viewport: Viewport,
    next_key: u64,
    current: Option<PreviewFrame>,
}

impl PreviewSurface {
    /// Create a surface backed by a composer.
    pub fn new(composer: PreviewComposer) -> Self {
        Self {
            composer,
            viewport: Viewport::default(),
            next_key: 0,
            current: None,
        }
    }

    /// Compose a bundle into a new render target.
    pub fn load(&mut self, bundle: &WebsiteBundle) -> &PreviewFrame {
        let html = self.composer.compose(bundle);
        self.next_key += 1;
        debug!(render_key = self.next_key, "Preview surface reloaded");
        self.current.insert(PreviewFrame {
            render_key: self.next_key,
            html,
        })
    }

    /// The frame currently shown, if any.
    pub fn current(&self) -> Option<&PreviewFrame> {
        self.current.as_ref()
    }

    /// Current viewport preset.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the viewport. Only the frame width changes, not the document.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Embed tag for the current frame at the current viewport.
    pub fn embed(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|frame| frame.iframe_tag(self.viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> WebsiteBundle {
        WebsiteBundle::new(
            "My Site",
            "<body><h1>Hi</h1></body>",
            "h1{color:red}",
            "console.log(1)",
        )
    }

    #[test]
    fn test_document_shell() {
        let html = PreviewComposer::default().compose(&bundle());
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
        assert!(html.contains(r#"name="viewport""#));
        assert!(html.contains("<title>My Site</title>"));
        assert!(html.contains("<style>h1{color:red}</style>"));
        assert!(html.contains("<body>\n<h1>Hi</h1>\n    <script>console.log(1)</script>\n</body>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_single_body_after_normalization() {
        let html = PreviewComposer::default().compose(&bundle());
        assert_eq!(html.matches("<body>").count(), 1);
        assert_eq!(html.matches("</body>").count(), 1);
        assert_eq!(html.matches("<h1>Hi</h1>").count(), 1);
    }

    #[test]
    fn test_trusted_mode_is_verbatim() {
        let bundle = WebsiteBundle::new("a</title>b", "", "x{}", "s('</script>')");
        let html = PreviewComposer::default().compose(&bundle);
        assert!(html.contains("<title>a</title>b</title>"));
        assert!(html.contains("<script>s('</script>')</script>"));
    }

    #[test]
    fn test_untrusted_mode_escapes() {
        let config = ComposerConfig::default().with_escape_mode(EscapeMode::Untrusted);
        let bundle = WebsiteBundle::new("a</title>b", "", "p{}</style>", "s('</script>')");
        let html = PreviewComposer::new(config).compose(&bundle);
        assert!(html.contains("<title>a&lt;/title&gt;b</title>"));
        assert!(html.contains("<style>p{}<\\/style></style>"));
        assert!(html.contains("<script>s('<\\/script>')</script>"));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_surface_keys_increase() {
        let mut surface = PreviewSurface::default();
        assert!(surface.current().is_none());

        let first = surface.load(&bundle()).render_key;
        let second = surface.load(&bundle()).render_key;
        assert!(second > first);
        assert_eq!(surface.current().unwrap().render_key, second);
    }

    #[test]
    fn test_viewport_does_not_recompose() {
        let mut surface = PreviewSurface::default();
        surface.load(&bundle());
        let key = surface.current().unwrap().render_key;

        surface.set_viewport(Viewport::Mobile);
        assert_eq!(surface.viewport(), Viewport::Mobile);
        assert_eq!(surface.current().unwrap().render_key, key);
        assert!(surface.embed().unwrap().contains("width: 375px"));
    }

    #[test]
    fn test_iframe_tag() {
        let frame = PreviewFrame {
            render_key: 7,
            html: "<p class=\"x\">a & b</p>".to_string(),
        };
        let tag = frame.iframe_tag(Viewport::Tablet);
        assert!(tag.contains(r#"sandbox="allow-scripts allow-same-origin""#));
        assert!(tag.contains(r#"data-render-key="7""#));
        assert!(tag.contains("width: 768px"));
        assert!(tag.contains(r#"srcdoc="&lt;p class=&quot;x&quot;&gt;a &amp; b&lt;/p&gt;""#));
    }

    #[test]
    fn test_data_url() {
        let frame = PreviewFrame {
            render_key: 1,
            html: "<p>hi</p>".to_string(),
        };
        assert_eq!(frame.to_data_url(), "data:text/html;base64,PHA+aGk8L3A+");
    }

    #[test]
    fn test_viewport_parse() {
        assert_eq!("Tablet".parse::<Viewport>().unwrap(), Viewport::Tablet);
        assert_eq!(Viewport::Desktop.width(), "100%");
        assert!("watch".parse::<Viewport>().is_err());
    }
}
