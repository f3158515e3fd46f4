//! Literal and quoted-identifier decoding shared by both languages.

use std::borrow::Cow;

use text_size::{TextRange, TextSize};

/// Decodes Zig escape sequences. Invalid escapes are kept verbatim and bytes
/// that do not form UTF-8 are replaced.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let simple = match bytes.get(i + 1) {
            Some(b'n') => Some(b'\n'),
            Some(b'r') => Some(b'\r'),
            Some(b't') => Some(b'\t'),
            Some(b'\\') => Some(b'\\'),
            Some(b'\'') => Some(b'\''),
            Some(b'"') => Some(b'"'),
            _ => None,
        };
        if let Some(byte) = simple {
            out.push(byte);
            i += 2;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b'x') => match hex_byte(bytes.get(i + 2..i + 4)) {
                Some(byte) => {
                    out.push(byte);
                    i += 4;
                }
                None => {
                    out.extend_from_slice(b"\\x");
                    i += 2;
                }
            },
            Some(b'u') => match unicode_escape(&bytes[i + 2..]) {
                Some((ch, len)) => {
                    let mut buf = [0; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                    i += 2 + len;
                }
                None => {
                    out.extend_from_slice(b"\\u");
                    i += 2;
                }
            },
            _ => {
                out.push(b'\\');
                i += 1;
            }
        }
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex_byte(digits: Option<&[u8]>) -> Option<u8> {
    let digits = std::str::from_utf8(digits?).ok()?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Parses `{N..}` after `\u`, returning the scalar and the consumed length.
fn unicode_escape(rest: &[u8]) -> Option<(char, usize)> {
    if rest.first() != Some(&b'{') {
        return None;
    }
    let close = rest.iter().position(|&b| b == b'}')?;
    let digits = std::str::from_utf8(&rest[1..close]).ok()?;
    if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let scalar = u32::from_str_radix(digits, 16).ok()?;
    Some((char::from_u32(scalar)?, close + 1))
}

/// Whether `text` ends with an unescaped `quote` that is not its opening one.
pub(crate) fn is_terminated(text: &str, quote: char) -> bool {
    let Some(body) = text.strip_prefix(quote) else {
        return false;
    };
    let Some(body) = body.strip_suffix(quote) else {
        return false;
    };
    let trailing_backslashes = body.bytes().rev().take_while(|&b| b == b'\\').count();
    trailing_backslashes % 2 == 0
}

/// Range of a quoted literal without its delimiters.
pub(crate) fn quoted_content_range(text: &str, range: TextRange, quote: char) -> TextRange {
    let start = if text.starts_with(quote) { 1 } else { 0 };
    let end = if is_terminated(text, quote) { text.len() - 1 } else { text.len() };
    TextRange::new(
        range.start() + TextSize::of(&text[..start]),
        range.start() + TextSize::of(&text[..end.max(start)]),
    )
}

/// One range per `\\` line, without the marker and the line break.
pub(crate) fn multiline_content_ranges(text: &str, range: TextRange) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let offset = line_start;
        line_start += line.len() + 1;

        let Some(marker) = line.find("\\\\") else {
            continue;
        };
        let content_start = offset + marker + 2;
        let content_end = (offset + line.trim_end_matches('\r').len()).max(content_start);
        ranges.push(TextRange::new(
            range.start() + TextSize::of(&text[..content_start]),
            range.start() + TextSize::of(&text[..content_end]),
        ));
    }

    ranges
}

/// Text of a multi-line literal: its line contents joined by `\n`.
pub(crate) fn multiline_content(source: &str, ranges: &[TextRange]) -> String {
    ranges.iter().map(|&range| &source[range]).collect::<Vec<_>>().join("\n")
}

/// Decoded value of a plain or `@"quoted"` identifier.
pub(crate) fn identifier_value(text: &str) -> Cow<'_, str> {
    let Some(quoted) = text.strip_prefix('@') else {
        return Cow::Borrowed(text);
    };
    if !quoted.starts_with('"') {
        return Cow::Borrowed(quoted);
    }

    let content = quoted_content_range(quoted, TextRange::up_to(TextSize::of(quoted)), '"');
    unescape(&quoted[content])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_values() {
        assert_eq!(identifier_value("foo"), "foo");
        assert_eq!(identifier_value("@\"foo bar\""), "foo bar");
        assert_eq!(identifier_value("@\"\""), "");
        assert_eq!(identifier_value("@\"a\\x41\\u{1F600}\""), "aA\u{1F600}");
    }

    #[test]
    fn malformed_identifiers_degrade() {
        assert_eq!(identifier_value("@\"unterminated"), "unterminated");
        assert_eq!(identifier_value("@\""), "");
        assert_eq!(identifier_value("@"), "");
        assert_eq!(identifier_value("@\"ends with escape\\\""), "ends with escape\"");
    }

    #[test]
    fn unescape_keeps_invalid_escapes() {
        assert_eq!(unescape("a\\qb"), "a\\qb");
        assert_eq!(unescape("\\xZZ"), "\\xZZ");
        assert_eq!(unescape("\\u{110000}"), "\\u{110000}");
        assert_eq!(unescape("tab\\there"), "tab\there");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn quoted_ranges() {
        let range = TextRange::new(10.into(), 15.into());
        assert_eq!(
            quoted_content_range("\"abc\"", range, '"'),
            TextRange::new(11.into(), 14.into())
        );
        assert_eq!(
            quoted_content_range("\"abc", TextRange::new(0.into(), 4.into()), '"'),
            TextRange::new(1.into(), 4.into())
        );
        assert_eq!(
            quoted_content_range("\"", TextRange::new(0.into(), 1.into()), '"'),
            TextRange::new(1.into(), 1.into())
        );
    }

    #[test]
    fn multiline_ranges() {
        let text = "\\\\one\n    \\\\two\r\n  \\\\";
        let ranges = multiline_content_ranges(text, TextRange::up_to(TextSize::of(text)));
        let lines: Vec<_> = ranges.iter().map(|&range| &text[range]).collect();
        assert_eq!(lines, ["one", "two", ""]);
        assert_eq!(multiline_content(text, &ranges), "one\ntwo\n");
    }
}
