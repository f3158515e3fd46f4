//! Lexer for Zon data files.

use text_size::{TextRange, TextSize};
pub use ziglet_syntax::zon::SyntaxKind;
use ziglet_syntax::zon::SyntaxKind::*;

use crate::RawToken;
use crate::cursor::{Cursor, is_ident_start};

/// Lazily yields every token of a Zon text, trivia included, ending with a
/// single empty `EOF` token. Zig keywords are plain identifiers here.
pub struct Lexer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    done: bool,
}

impl<'t> Lexer<'t> {
    /// # Panics
    ///
    /// Panics if `text` is longer than `u32::MAX` bytes, the limit of
    /// [`TextSize`] offsets.
    pub fn new(text: &'t str) -> Self {
        Self::at(text, TextSize::new(0))
    }

    /// Restarts lexing at `offset`, which must be a token boundary.
    pub fn at(text: &'t str, offset: TextSize) -> Self {
        let start = usize::from(offset).min(text.len());
        Self { text, cursor: Cursor::new(&text[start..]), done: false }
    }

    fn range(&self) -> TextRange {
        let end = TextSize::of(self.text) - self.cursor.len();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn token_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            ' ' | '\t' | '\r' | '\n' => {
                self.cursor.whitespace();
                WHITESPACE
            }
            '.' => DOT,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            '=' => EQ,
            '-' => MINUS,
            '/' if self.cursor.eat('/') => {
                self.cursor.line();
                LINE_COMMENT
            }
            '\\' if self.cursor.eat('\\') => {
                self.cursor.line_strings();
                LINE_STRING
            }
            '"' => {
                self.cursor.quoted('"');
                STRING_LITERAL_SINGLE
            }
            '\'' => {
                self.cursor.quoted('\'');
                CHAR_LITERAL
            }
            '@' if self.cursor.eat('"') => {
                self.cursor.quoted('"');
                IDENTIFIER
            }
            first @ '0'..='9' => {
                if self.cursor.number(first) { FLOAT } else { INTEGER }
            }
            c if is_ident_start(c) => {
                self.cursor.identifier();
                IDENTIFIER
            }
            _ => BAD_CHARACTER,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = RawToken<SyntaxKind>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let kind = self.token_kind();
        let range = self.range();
        self.cursor.reset_pos_within_token();
        self.done = kind == EOF;

        Some(RawToken { kind, range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<(SyntaxKind, &str)> {
        Lexer::new(text)
            .filter(|token| token.kind != WHITESPACE && token.kind != EOF)
            .map(|token| (token.kind, &text[token.range]))
            .collect()
    }

    #[test]
    fn struct_literal() {
        assert_eq!(
            lex(".{ .name = \"ziglet\", .version = -1.5e3, .@\"x y\" = .enum_value }"),
            [
                (DOT, "."),
                (LEFT_BRACE, "{"),
                (DOT, "."),
                (IDENTIFIER, "name"),
                (EQ, "="),
                (STRING_LITERAL_SINGLE, "\"ziglet\""),
                (COMMA, ","),
                (DOT, "."),
                (IDENTIFIER, "version"),
                (EQ, "="),
                (MINUS, "-"),
                (FLOAT, "1.5e3"),
                (COMMA, ","),
                (DOT, "."),
                (IDENTIFIER, "@\"x y\""),
                (EQ, "="),
                (DOT, "."),
                (IDENTIFIER, "enum_value"),
                (RIGHT_BRACE, "}"),
            ]
        );
    }

    #[test]
    fn zig_only_tokens_are_bad_characters() {
        assert_eq!(
            lex("true const @import / ;"),
            [
                (IDENTIFIER, "true"),
                (IDENTIFIER, "const"),
                (BAD_CHARACTER, "@"),
                (IDENTIFIER, "import"),
                (BAD_CHARACTER, "/"),
                (BAD_CHARACTER, ";"),
            ]
        );
    }

    #[test]
    fn comments_and_line_strings() {
        assert_eq!(
            lex("// note\n\\\\a\n\\\\b\n'c'"),
            [(LINE_COMMENT, "// note"), (LINE_STRING, "\\\\a\n\\\\b"), (CHAR_LITERAL, "'c'")]
        );
    }

    #[test]
    fn tokens_cover_the_input() {
        for input in ["", ".{}", "\"open\n", ".{ .a = 0x10, }\n// end", "\u{feff}.{}"] {
            let tokens: Vec<_> = Lexer::new(input).collect();
            let covered: String = tokens.iter().map(|token| &input[token.range]).collect();
            assert_eq!(covered, input);
            assert_eq!(tokens.last().map(|token| token.kind), Some(EOF));
        }
    }
}
