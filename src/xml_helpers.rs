//! Shared XML text utilities for the workbook writer.
//!
//! Cell text comes straight from form input, so it is escaped and scrubbed
//! of characters XML 1.0 cannot carry before it reaches a worksheet part.

/// Minimal XML escaping for attribute/text content.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `c` may appear in an XML 1.0 document.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for a `<t>` element, dropping characters XML cannot encode.
///
/// Returns the escaped text and the number of characters dropped.
pub fn escape_cell_text(s: &str) -> (String, usize) {
    let mut dropped = 0;
    let clean: String = s
        .chars()
        .filter(|&c| {
            let keep = is_xml_char(c);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    (xml_escape(&clean), dropped)
}

/// Leading or trailing whitespace is lost without `xml:space="preserve"`.
pub fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_cell_text_drops_control_chars() {
        let (text, dropped) = escape_cell_text("Paris\u{1}\u{8} guide\tok\u{FFFE}");
        assert_eq!(text, "Paris guide\tok");
        assert_eq!(dropped, 3);
    }

    #[test]
    fn test_needs_space_preserve() {
        assert!(needs_space_preserve(" lead"));
        assert!(needs_space_preserve("trail\n"));
        assert!(!needs_space_preserve("in side"));
        assert!(!needs_space_preserve(""));
    }
}
