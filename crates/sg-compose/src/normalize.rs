//! Fragment normalization.
//!
//! Generated markup is supposed to be body content, but it regularly arrives
//! wrapped in a full document. Before it is embedded in a new shell the
//! fragment is stripped of:
//!
//! 1. the first `<head ...>...</head>` block, content included;
//! 2. every `<!DOCTYPE ...>`, `<html ...>`, `</html>`, `<body ...>` and
//!    `</body>` tag.
//!
//! When the fragment has no head block, step 1 runs once more after step 2,
//! since removing wrapper tags can splice a head block together. At most one
//! head block is ever removed, so the output is stable under a second pass
//! unless it still holds a complete head block.
//!
//! Matching is an explicit byte scan. Tag names compare ASCII
//! case-insensitively and must be followed by `>`, `/` or whitespace, so
//! `<header>` and `<htmlx>` are left alone. A tag with no closing `>` is
//! left in place, and a `<head>` with no `</head>` removes nothing.

use std::borrow::Cow;

/// Tag names stripped wherever they appear, opening or closing.
const WRAPPER_TAGS: [&str; 3] = ["!doctype", "html", "body"];

/// Strip document-level wrapper tags from an HTML fragment.
///
/// Returns the input unchanged (borrowed) when it contains no wrapper tags.
/// Never fails; malformed input is handled best-effort.
pub fn normalize(fragment: &str) -> Cow<'_, str> {
    let mut text = strip_head_block(fragment);
    let mut head_removed = text.is_some();

    loop {
        // Removing a tag can splice its neighbours into a new one, so repeat
        // until the text is stable. Each round strictly shrinks the text.
        while let Some(next) = strip_wrapper_tags(text.as_deref().unwrap_or(fragment)) {
            text = Some(next);
        }
        if head_removed || text.is_none() {
            break;
        }
        match strip_head_block(text.as_deref().unwrap_or(fragment)) {
            Some(next) => {
                text = Some(next);
                head_removed = true;
            }
            None => break,
        }
    }

    match text {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(fragment),
    }
}

/// Whether the fragment contains anything `normalize` would remove.
pub fn has_wrapper_tags(fragment: &str) -> bool {
    matches!(normalize(fragment), Cow::Owned(_))
}

/// Remove the first complete head block, or return `None` if there is none.
fn strip_head_block(fragment: &str) -> Option<String> {
    let bytes = fragment.as_bytes();
    let start = find_tag(bytes, 0, "head", false)?;
    let close = find_tag(bytes, start + 1, "head", true)?;
    let end = tag_end(bytes, close)?;

    let mut out = String::with_capacity(fragment.len() - (end - start));
    out.push_str(&fragment[..start]);
    out.push_str(&fragment[end..]);
    Some(out)
}

/// Remove every wrapper tag in one pass, or return `None` if none matched.
fn strip_wrapper_tags(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut i = 0;

    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'<') {
        let lt = i + offset;
        match wrapper_tag_end(bytes, lt) {
            Some(end) => {
                let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                buf.push_str(&text[copied..lt]);
                copied = end;
                i = end;
            }
            None => i = lt + 1,
        }
    }

    out.map(|mut buf| {
        buf.push_str(&text[copied..]);
        buf
    })
}

/// End (exclusive) of the wrapper tag starting at `lt`, if it is one.
fn wrapper_tag_end(bytes: &[u8], lt: usize) -> Option<usize> {
    let closing = bytes.get(lt + 1) == Some(&b'/');
    let name_start = if closing { lt + 2 } else { lt + 1 };

    WRAPPER_TAGS
        .iter()
        .filter(|name| !(closing && name.starts_with('!')))
        .find(|name| name_matches(bytes, name_start, name))
        .and_then(|_| tag_end(bytes, lt))
}

/// Position of the first `<name` (or `</name` when `closing`) at or after `from`.
fn find_tag(bytes: &[u8], from: usize, name: &str, closing: bool) -> Option<usize> {
    let mut i = from;
    while let Some(offset) = bytes.get(i..)?.iter().position(|&b| b == b'<') {
        let lt = i + offset;
        let matched = if closing {
            bytes.get(lt + 1) == Some(&b'/') && name_matches(bytes, lt + 2, name)
        } else {
            name_matches(bytes, lt + 1, name)
        };
        if matched {
            return Some(lt);
        }
        i = lt + 1;
    }
    None
}

/// Case-insensitive tag name match at `pos`, followed by a name boundary.
fn name_matches(bytes: &[u8], pos: usize, name: &str) -> bool {
    let end = pos + name.len();
    end <= bytes.len()
        && bytes[pos..end].eq_ignore_ascii_case(name.as_bytes())
        && bytes
            .get(end)
            .is_some_and(|&b| b == b'>' || b == b'/' || b.is_ascii_whitespace())
}

/// Index just past the `>` closing the tag that starts at `lt`.
fn tag_end(bytes: &[u8], lt: usize) -> Option<usize> {
    bytes[lt..]
        .iter()
        .position(|&b| b == b'>')
        .map(|offset| lt + offset + 1)
}
