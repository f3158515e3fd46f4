use std::fmt;
use std::hash::Hash;

/// A closed enumeration of token and node kinds for one language.
///
/// Implementors are plain `#[repr(u16)]` enums; the raw value is used by
/// [`SyntaxSet`](crate::SyntaxSet) as a bit index.
pub trait Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Placeholder kind for parser start events that are not completed yet.
    /// Never appears in a finished tree.
    const TOMBSTONE: Self;

    fn into_raw(self) -> u16;

    /// Whitespace and comments.
    fn is_trivia(self) -> bool;
}
