//! `href` quote stripping for rich-text bodies.
//!
//! Entry tools sometimes wrap link targets in extra quotes (`href=\"http://x\"`
//! or `href='"http://x"'`), which the upload importer rejects. Start tags are
//! located with HTML tokenization rules and their attributes parsed with
//! quick-xml in HTML mode. Only tags whose `href` actually changes are
//! re-serialized; every other byte is copied through untouched.
//!
//! A `<` that does not open a tag (`1 < 2`, `<3`) is text. A tag whose end
//! cannot be found is text too, and scanning resumes right after its `<`, so
//! one broken fragment never hides the tags that follow it.

use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesStart;
use std::borrow::Cow;

/// Quote spellings removed from `href` values. Escaped forms go first so
/// their backslash is removed with the quote.
const QUOTE_FORMS: [&str; 6] = ["\\\"", "&quot;", "&#34;", "&#x22;", "&#X22;", "\""];

/// Strip double quotes from every `href` in `html`.
///
/// Never fails: fragments that are not well-formed tags are kept as text.
/// Applying it to its own output is a no-op.
pub fn normalize_markup(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    fix_markup(html).unwrap_or_else(|| html.to_string())
}

/// Core of [`normalize_markup`].
///
/// Returns `None` when no `href` needed changing.
pub fn fix_markup(html: &str) -> Option<String> {
    let bytes = html.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = html.get(pos..).and_then(|rest| rest.find('<')) {
        let open = pos + found;
        let after = open + 1;
        let rest = html.get(after..).unwrap_or_default();

        if rest.starts_with("!--") {
            // Comment bodies are opaque; an unterminated one runs to the end
            pos = rest.find("-->").map_or(html.len(), |end| after + end + 3);
            continue;
        }
        if !bytes.get(after).is_some_and(u8::is_ascii_alphabetic) {
            pos = after;
            continue;
        }
        let Some(close) = tag_end(bytes, after) else {
            tracing::debug!(offset = open, "unterminated tag kept as text");
            pos = after;
            continue;
        };
        pos = close + 1;

        let Some(rewritten) = html.get(after..close).and_then(rewrite_href_tag) else {
            continue;
        };
        let buf = out.get_or_insert_with(|| String::with_capacity(html.len()));
        buf.push_str(html.get(copied..open).unwrap_or_default());
        buf.push('<');
        buf.push_str(&rewritten);
        buf.push('>');
        copied = pos;
    }

    let mut buf = out?;
    buf.push_str(html.get(copied..).unwrap_or_default());
    Some(buf)
}

/// Offset of the `>` closing the tag whose name starts at `from`.
///
/// A quote only opens a value directly after `=` (whitespace allowed), so
/// `href=\"x\"` is an unquoted value and its quotes are plain bytes.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'>' => return Some(i),
            b'=' => {
                let mut j = i + 1;
                while bytes.get(j).is_some_and(u8::is_ascii_whitespace) {
                    j += 1;
                }
                match bytes.get(j) {
                    Some(&quote @ (b'"' | b'\'')) => {
                        let len = bytes.get(j + 1..)?.iter().position(|&c| c == quote)?;
                        i = j + len + 2;
                    }
                    _ => i = j,
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Split a trailing self-closing `/` off tag content.
///
/// In `<a href=x/>` the slash belongs to the unquoted value.
fn split_self_closing(content: &str) -> (&str, bool) {
    match content.strip_suffix('/') {
        Some(body)
            if body.ends_with(|c: char| c.is_ascii_whitespace() || c == '"' || c == '\'')
                || !body.contains(|c: char| c.is_ascii_whitespace()) =>
        {
            (body, true)
        }
        _ => (content, false),
    }
}

/// Rebuild a tag's content (between `<` and `>`) if any `href` on it
/// contains quotes. `None` leaves the tag as written.
fn rewrite_href_tag(content: &str) -> Option<String> {
    let (content, self_closing) = split_self_closing(content);
    let name_len = content
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(content.len());
    let name = content.get(..name_len)?;

    let tag = BytesStart::from_content(content, name_len);
    let mut iter = tag.html_attributes();
    // Repeated attributes are kept; each `href` is stripped
    iter.with_checks(false);
    let attrs = match iter.collect::<std::result::Result<Vec<_>, _>>() {
        Ok(attrs) => attrs,
        Err(err) => {
            tracing::debug!(error = %err, tag = name, "unreadable attributes, tag left as written");
            return None;
        }
    };
    if !attrs.iter().any(is_href) {
        return None;
    }

    let mut rebuilt = BytesStart::new(name);
    let mut changed = false;

    for attr in &attrs {
        let value = std::str::from_utf8(&attr.value).ok()?;
        let value = if is_href(attr) {
            let stripped = strip_quotes(value);
            changed |= matches!(stripped, Cow::Owned(_));
            stripped
        } else {
            escape_quotes(value)
        };
        rebuilt.push_attribute((attr.key.as_ref(), value.as_bytes()));
    }

    if !changed {
        return None;
    }
    let mut text = std::str::from_utf8(&rebuilt).ok()?.to_string();
    if self_closing {
        text.push('/');
    }
    Some(text)
}

fn is_href(attr: &Attribute<'_>) -> bool {
    attr.key.as_ref().eq_ignore_ascii_case(b"href")
}

fn strip_quotes(value: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(value);
    for form in QUOTE_FORMS {
        if out.contains(form) {
            out = Cow::Owned(out.replace(form, ""));
        }
    }
    out
}

/// Other attributes are re-emitted in double quotes; a value that was
/// single-quoted may contain `"`.
fn escape_quotes(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}
