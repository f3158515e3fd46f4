//! Lexers for Zig and Zon.
//!
//! Each language has a lossless [`zig::Lexer`] / [`zon::Lexer`] yielding
//! [`RawToken`]s that cover the whole text. The [`Tokenizer`] groups those
//! raw tokens into [`Token`]s carrying their surrounding trivia, which is
//! what the parser consumes. [`string::lex`] and [`highlight`] provide the
//! escape-level view of Zig literals.

mod cursor;
pub mod highlight;
pub mod string;
pub mod zig;
pub mod zon;

use std::iter::Peekable;

use text_size::{TextRange, TextSize};
use ziglet_tree::{Kind, TriviaPiece};

/// A token as produced by a lexer: its kind and its range in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawToken<K> {
    pub kind: K,
    pub range: TextRange,
}

/// A significant token together with the trivia attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    pub leading: Vec<TriviaPiece<K>>,
    pub kind: K,
    pub range: TextRange,
    pub trailing: Vec<TriviaPiece<K>>,
}

impl<K> Token<K> {
    /// Range including the leading and trailing trivia.
    pub fn full_range(&self) -> TextRange {
        let leading: TextSize = self.leading.iter().map(|piece| piece.len).sum();
        let trailing: TextSize = self.trailing.iter().map(|piece| piece.len).sum();
        TextRange::new(self.range.start() - leading, self.range.end() + trailing)
    }
}

/// Groups a raw token stream: trivia on earlier lines leads the next
/// significant token, trivia up to the end of the line trails the previous
/// one. The final `EOF` token takes all remaining trivia.
pub struct Tokenizer<'t, K, I: Iterator<Item = RawToken<K>>> {
    text: &'t str,
    raw: Peekable<I>,
}

impl<'t, K: Kind, I: Iterator<Item = RawToken<K>>> Tokenizer<'t, K, I> {
    pub fn new(text: &'t str, raw: I) -> Self {
        Self { text, raw: raw.peekable() }
    }
}

impl<K: Kind, I: Iterator<Item = RawToken<K>>> Iterator for Tokenizer<'_, K, I> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut leading = Vec::new();
        let token = loop {
            let raw = self.raw.next()?;
            if !raw.kind.is_trivia() {
                break raw;
            }
            leading.push(TriviaPiece::new(raw.kind, raw.range.len()));
        };

        let text = self.text;
        let mut trailing = Vec::new();
        while let Some(raw) =
            self.raw.next_if(|raw| raw.kind.is_trivia() && !text[raw.range].contains('\n'))
        {
            trailing.push(TriviaPiece::new(raw.kind, raw.range.len()));
        }

        Some(Token { leading, kind: token.kind, range: token.range, trailing })
    }
}
