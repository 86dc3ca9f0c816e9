//! Fuzz target for preview composition and packaging.
//!
//! Any bundle composes into exactly one document shell, and the packaged
//! stylesheet and script are the bundle's own text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sg_common::WebsiteBundle;
use sg_compose::{BundlePackager, ComposerConfig, EscapeMode, PreviewComposer};

#[derive(Debug, Arbitrary)]
struct Input {
    title: String,
    html: String,
    css: String,
    js: String,
    untrusted: bool,
}

fuzz_target!(|input: Input| {
    let mode = if input.untrusted {
        EscapeMode::Untrusted
    } else {
        EscapeMode::Trusted
    };
    let config = ComposerConfig::default().with_escape_mode(mode);
    let bundle = WebsiteBundle::new(input.title, input.html, input.css, input.js);

    let document = PreviewComposer::new(config.clone()).compose(&bundle);
    assert!(document.starts_with("<!DOCTYPE html>"));

    let package = BundlePackager::new(config).package(&bundle);
    assert_eq!(package.files.len(), 3);
    assert_eq!(package.files[1].content, bundle.css);
    assert_eq!(package.files[2].content, bundle.js);
});
