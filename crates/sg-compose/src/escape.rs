//! Escaping helpers for interpolating text into the document shell.

use std::borrow::Cow;

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Keep raw-text content from closing its `<style>` or `<script>` element.
///
/// Every `</tag` (ASCII case-insensitive) becomes `<\/tag`, which CSS and
/// JavaScript both read as the same characters.
pub fn guard_raw_text<'a>(content: &'a str, tag: &str) -> Cow<'a, str> {
    let bytes = content.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut i = 0;

    while let Some(offset) = bytes[i..].windows(2).position(|w| w == b"</") {
        let lt = i + offset;
        let name_start = lt + 2;
        let name_end = name_start + tag.len();
        if name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(tag.as_bytes())
        {
            let buf = out.get_or_insert_with(|| String::with_capacity(content.len() + 8));
            buf.push_str(&content[copied..lt]);
            buf.push_str("<\\/");
            copied = name_start;
        }
        i = lt + 2;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&content[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(content),
    }
}
