//! Layered token stream for highlighting: the primary Zig tokens with each
//! single-line string or char literal replaced by its escape sub-tokens.

use std::vec;

use ziglet_syntax::zig::SyntaxKind::{self, *};

use crate::RawToken;
use crate::zig::Lexer;

pub fn zig_tokens(text: &str) -> Highlight<'_> {
    Highlight { text, lexer: Lexer::new(text), pending: Vec::new().into_iter() }
}

pub struct Highlight<'t> {
    text: &'t str,
    lexer: Lexer<'t>,
    pending: vec::IntoIter<RawToken<SyntaxKind>>,
}

impl Iterator for Highlight<'_> {
    type Item = RawToken<SyntaxKind>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.next() {
            return Some(token);
        }

        let token = self.lexer.next()?;
        match token.kind {
            STRING_LITERAL_SINGLE | CHAR_LITERAL if !token.range.is_empty() => {
                self.pending = crate::string::lex(self.text, token.range).into_iter();
                self.pending.next()
            }
            _ => Some(token),
        }
    }
}
