//! Trivia pieces attached to tokens.

use text_size::TextSize;

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece<K> {
    pub kind: K,
    pub len: TextSize,
}

impl<K> TriviaPiece<K> {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: K, len: TextSize) -> Self {
        Self { kind, len }
    }
}
