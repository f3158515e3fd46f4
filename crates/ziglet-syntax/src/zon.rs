//! Token and node kinds of Zon data files.

use ziglet_tree::Kind;

pub type SyntaxTree = ziglet_tree::SyntaxTree<SyntaxKind>;
pub type SyntaxNode<'a> = ziglet_tree::SyntaxNode<'a, SyntaxKind>;
pub type SyntaxToken<'a> = ziglet_tree::SyntaxToken<'a, SyntaxKind>;
pub type SyntaxElement<'a> = ziglet_tree::SyntaxElement<'a, SyntaxKind>;
pub type SyntaxSet = ziglet_tree::SyntaxSet<SyntaxKind>;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    DOT,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    EQ,
    MINUS,

    IDENTIFIER,
    INTEGER,
    FLOAT,
    CHAR_LITERAL,
    STRING_LITERAL_SINGLE,
    LINE_STRING,

    LINE_COMMENT,
    WHITESPACE,
    BAD_CHARACTER,
    EOF,

    FILE,
    STRUCT,
    ARRAY,
    ENTRY,
    IDENT,
    ENUM_LITERAL,
    STRING_LITERAL,
    CHAR,
    NUMBER,

    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl Kind for SyntaxKind {
    const TOMBSTONE: Self = TOMBSTONE;

    fn into_raw(self) -> u16 {
        self as u16
    }

    fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | LINE_COMMENT)
    }
}

impl SyntaxKind {
    /// Source text of punctuation.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            DOT => ".",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            COMMA => ",",
            EQ => "=",
            MINUS => "-",
            _ => return None,
        };
        Some(text)
    }
}
