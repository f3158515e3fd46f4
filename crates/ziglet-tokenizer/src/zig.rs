//! Lexer for Zig source files.

use text_size::{TextRange, TextSize};
pub use ziglet_syntax::zig::SyntaxKind;
use ziglet_syntax::zig::SyntaxKind::*;

use crate::RawToken;
use crate::cursor::{Cursor, is_ident_start};

/// Lazily yields every token of a Zig text, trivia included, ending with a
/// single empty `EOF` token.
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

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'t str {
        &self.text[self.range()]
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
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ';' => SEMICOLON,
            ':' => COLON,
            '~' => TILDE,
            '?' => QUESTION,
            '.' => self.dot(),
            '=' => self.either(&[('=', EQ2), ('>', FAT_ARROW)], EQ),
            '!' => self.either(&[('=', BANG_EQ)], BANG),
            '<' => self.less(),
            '>' => self.greater(),
            '+' => self.arithmetic(
                [PLUS, PLUS_EQ, PLUS_PERCENT, PLUS_PERCENT_EQ, PLUS_PIPE, PLUS_PIPE_EQ],
                ('+', PLUS2),
            ),
            '-' => self.arithmetic(
                [MINUS, MINUS_EQ, MINUS_PERCENT, MINUS_PERCENT_EQ, MINUS_PIPE, MINUS_PIPE_EQ],
                ('>', ARROW),
            ),
            '*' => self.arithmetic(
                [STAR, STAR_EQ, STAR_PERCENT, STAR_PERCENT_EQ, STAR_PIPE, STAR_PIPE_EQ],
                ('*', STAR2),
            ),
            '/' => self.slash(),
            '%' => self.either(&[('=', PERCENT_EQ)], PERCENT),
            '&' => self.either(&[('=', AMP_EQ)], AMP),
            '|' => self.either(&[('=', PIPE_EQ), ('|', PIPE2)], PIPE),
            '^' => self.either(&[('=', CARET_EQ)], CARET),
            '\\' if self.cursor.eat('\\') => {
                self.cursor.line_strings();
                STRING_LITERAL_MULTI
            }
            '"' => {
                self.cursor.quoted('"');
                STRING_LITERAL_SINGLE
            }
            '\'' => {
                self.cursor.quoted('\'');
                CHAR_LITERAL
            }
            '@' => self.at_sign(),
            first @ '0'..='9' => {
                if self.cursor.number(first) { FLOAT } else { INTEGER }
            }
            c if is_ident_start(c) => {
                self.cursor.identifier();
                SyntaxKind::from_keyword(self.text()).unwrap_or(IDENTIFIER)
            }
            _ => BAD_CHARACTER,
        }
    }

    /// Advances over the first matching second character.
    fn either(&mut self, pairs: &[(char, SyntaxKind)], single: SyntaxKind) -> SyntaxKind {
        for &(c, kind) in pairs {
            if self.cursor.eat(c) {
                return kind;
            }
        }
        single
    }

    fn dot(&mut self) -> SyntaxKind {
        if self.cursor.eat('*') {
            return DOT_STAR;
        }
        if self.cursor.eat('.') {
            return if self.cursor.eat('.') { ELLIPSIS } else { DOT2 };
        }
        DOT
    }

    fn less(&mut self) -> SyntaxKind {
        if self.cursor.eat('=') {
            return LT_EQ;
        }
        if !self.cursor.eat('<') {
            return LT;
        }
        if self.cursor.eat('|') {
            return if self.cursor.eat('=') { SHL_PIPE_EQ } else { SHL_PIPE };
        }
        if self.cursor.eat('=') { SHL_EQ } else { SHL }
    }

    fn greater(&mut self) -> SyntaxKind {
        if self.cursor.eat('=') {
            return GT_EQ;
        }
        if !self.cursor.eat('>') {
            return GT;
        }
        if self.cursor.eat('=') { SHR_EQ } else { SHR }
    }

    /// `+`, `-` and `*` with their `=`, `%` and `|` forms plus one extra
    /// two-character operator.
    fn arithmetic(&mut self, kinds: [SyntaxKind; 6], (c, extra): (char, SyntaxKind)) -> SyntaxKind {
        let [single, assign, wrap, wrap_assign, saturate, saturate_assign] = kinds;
        if self.cursor.eat('=') {
            return assign;
        }
        if self.cursor.eat('%') {
            return if self.cursor.eat('=') { wrap_assign } else { wrap };
        }
        if self.cursor.eat('|') {
            return if self.cursor.eat('=') { saturate_assign } else { saturate };
        }
        if self.cursor.eat(c) { extra } else { single }
    }

    fn slash(&mut self) -> SyntaxKind {
        if self.cursor.eat('=') {
            return SLASH_EQ;
        }
        if !self.cursor.eat('/') {
            return SLASH;
        }

        let kind = match (self.cursor.peek(), self.cursor.second()) {
            ('!', _) => CONTAINER_DOC_COMMENT,
            ('/', '/') => LINE_COMMENT,
            ('/', _) => DOC_COMMENT,
            _ => LINE_COMMENT,
        };
        self.cursor.line();
        kind
    }

    fn at_sign(&mut self) -> SyntaxKind {
        if self.cursor.eat('"') {
            self.cursor.quoted('"');
            return IDENTIFIER;
        }
        if !self.cursor.is_eof() && is_ident_start(self.cursor.peek()) {
            self.cursor.identifier();
            return BUILTIN;
        }
        BAD_CHARACTER
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
