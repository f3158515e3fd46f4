use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Character cursor over the unread suffix of a text.
pub(crate) struct Cursor<'t> {
    chars: Chars<'t>,
    len: TextSize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { chars: text.chars(), len: text.text_len() }
    }

    /// Length of the unread input.
    pub(crate) fn len(&self) -> TextSize {
        self.chars.as_str().text_len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len();
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        !self.is_eof() && self.peek() == c
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    /// Advances if the next character is `c`.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        let matched = self.matches(c);
        if matched {
            self.advance();
        }
        matched
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    pub(crate) fn whitespace(&mut self) {
        self.advance_while(is_whitespace);
    }

    /// Consumes up to, not including, the next line break.
    pub(crate) fn line(&mut self) {
        self.advance_while(|c| c != '\n');
    }

    pub(crate) fn identifier(&mut self) {
        self.advance_while(is_ident_continue);
    }

    /// Body of a quoted literal after its opening `quote`. Stops after an
    /// unescaped closing quote or before a line break.
    pub(crate) fn quoted(&mut self, quote: char) {
        while !self.is_eof() {
            match self.peek() {
                '\n' => return,
                '\\' => {
                    self.advance();
                    if !self.is_eof() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                c => {
                    self.advance();
                    if c == quote {
                        return;
                    }
                }
            }
        }
    }

    /// `\\` lines after the first marker. Subsequent lines join the token
    /// while their first non-blank characters are another `\\`.
    pub(crate) fn line_strings(&mut self) {
        loop {
            self.line();

            let mut lookahead = self.chars.clone();
            if lookahead.next() != Some('\n') {
                return;
            }
            let rest = lookahead.as_str().trim_start_matches([' ', '\t', '\r']);
            if !rest.starts_with("\\\\") {
                return;
            }

            let skipped = self.chars.as_str().len() - rest.len();
            self.chars = self.chars.as_str()[skipped..].chars();
        }
    }

    /// Digits, exponent and trailing alphanumerics of a number whose first
    /// digit was already consumed. Returns whether the literal is a float.
    pub(crate) fn number(&mut self, first: char) -> bool {
        let hex = first == '0' && self.eat('x');
        if first == '0' && !hex && (self.matches('o') || self.matches('b')) {
            self.advance();
        }
        self.digits(hex);

        let mut float = false;
        if self.matches('.') && is_digit(self.second(), hex) {
            self.advance();
            self.digits(hex);
            float = true;
        }

        let exponent = if hex { ['p', 'P'] } else { ['e', 'E'] };
        if exponent.contains(&self.peek()) && !self.is_eof() {
            self.advance();
            if self.matches('+') || self.matches('-') {
                self.advance();
            }
            self.digits(false);
            float = true;
        }

        self.identifier();
        float
    }

    fn digits(&mut self, hex: bool) {
        self.advance_while(|c| c == '_' || is_digit(c, hex));
    }
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_digit(c: char, hex: bool) -> bool {
    if hex { c.is_ascii_hexdigit() } else { c.is_ascii_digit() }
}
