//! Escape-sequence lexer for the bodies of single-line string and char
//! literals.

use text_size::TextRange;
use ziglet_syntax::zig::SyntaxKind::{self, *};

use crate::RawToken;
use crate::cursor::Cursor;

/// Splits the literal token at `range` into `STRING_TEXT` runs and escape
/// sub-tokens. The result covers exactly `range`, quotes included.
pub fn lex(text: &str, range: TextRange) -> Vec<RawToken<SyntaxKind>> {
    let mut cursor = Cursor::new(&text[range]);
    let mut tokens = Vec::new();
    let mut offset = range.start();

    while !cursor.is_eof() {
        let kind = if cursor.eat('\\') {
            escape(&mut cursor)
        } else {
            cursor.advance_while(|c| c != '\\');
            STRING_TEXT
        };

        let len = cursor.pos_within_token();
        tokens.push(RawToken { kind, range: TextRange::at(offset, len) });
        offset += len;
        cursor.reset_pos_within_token();
    }

    tokens
}

/// Escape after its backslash.
fn escape(cursor: &mut Cursor<'_>) -> SyntaxKind {
    if cursor.is_eof() {
        return INVALID_CHARACTER_ESCAPE;
    }

    match cursor.advance() {
        'n' | 'r' | 't' | '\\' | '\'' | '"' => VALID_ESCAPE,
        'x' => match hex_digits(cursor, 2) {
            (2, _) => VALID_ESCAPE,
            _ => INVALID_CHARACTER_ESCAPE,
        },
        'u' => unicode(cursor),
        _ => INVALID_CHARACTER_ESCAPE,
    }
}

/// `\u{N..}` with one to six hex digits naming a scalar value.
fn unicode(cursor: &mut Cursor<'_>) -> SyntaxKind {
    if !cursor.eat('{') {
        return INVALID_UNICODE_ESCAPE;
    }

    let (digits, value) = hex_digits(cursor, usize::MAX);
    let closed = cursor.eat('}');
    if closed && (1..=6).contains(&digits) && char::from_u32(value).is_some() {
        VALID_ESCAPE
    } else {
        INVALID_UNICODE_ESCAPE
    }
}

/// Consumes up to `max` hex digits, returning their count and value.
fn hex_digits(cursor: &mut Cursor<'_>, max: usize) -> (usize, u32) {
    let mut count = 0;
    let mut value = 0u32;
    while count < max && !cursor.is_eof() {
        let Some(digit) = cursor.peek().to_digit(16) else {
            break;
        };
        cursor.advance();
        value = value.saturating_mul(16).saturating_add(digit);
        count += 1;
    }
    (count, value)
}
