//! Lossless, immutable syntax tree with parent links and materialized trivia.
//!
//! The tree is built once from parser events and stored as flat arenas of
//! nodes, children and tokens addressed by index. Navigation goes through
//! `Copy` handles that borrow the tree, so there is no refcounting and no
//! cyclic ownership.

mod builder;
mod kind;
mod syntax;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Per-language kind enumeration contract.
pub use kind::Kind;
/// Primary syntax tree API types and adapters.
pub use syntax::{
    Children, ChildrenWithTokens, NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement,
    SyntaxNode, SyntaxToken, SyntaxTree, TokenAtOffset, WalkEvent, WalkEventWithTokens,
};
/// Compact set for grouping kinds.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::TriviaPiece;

pub use text_size::{TextLen, TextRange, TextSize};

#[cfg(test)]
mod tests {
    use crate::{Builder, Kind, SyntaxTree, TextRange, TextSize, TokenAtOffset, TriviaPiece};

    #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    #[repr(u16)]
    pub(crate) enum TestKind {
        ATOM,
        PLUS,
        WS,
        ROOT,
        BINARY,
        ERROR,
        TOMBSTONE,
    }

    use TestKind::*;

    impl Kind for TestKind {
        const TOMBSTONE: Self = TOMBSTONE;

        fn into_raw(self) -> u16 {
            self as u16
        }

        fn is_trivia(self) -> bool {
            self == WS
        }
    }

    /// `a + b` with the whitespace attached as trailing trivia of `a` and `+`.
    fn sum() -> SyntaxTree<TestKind> {
        let ws = TriviaPiece::new(WS, 1.into());
        let mut builder = Builder::new("a + b");
        builder.start_node(ROOT);
        builder.start_node(BINARY);
        builder.start_node(ROOT);
        builder.token([], ATOM, 1.into(), [ws]);
        builder.finish_node();
        builder.token([], PLUS, 1.into(), [ws]);
        builder.start_node(ERROR);
        builder.token([], ATOM, 1.into(), []);
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn tokens_cover_text() {
        let tree = sum();
        let text: String = tree.tokens().map(|token| token.text()).collect();
        assert_eq!(text, "a + b");
        assert_eq!(tree.root().text_range(), TextRange::new(0.into(), 5.into()));
    }

    #[test]
    fn token_at_offset() {
        let tree = sum();
        let root = tree.root();

        let TokenAtOffset::Between(left, right) = root.token_at_offset(TextSize::new(2)) else {
            panic!("expected an offset between two tokens");
        };
        assert_eq!(left.kind(), WS);
        assert_eq!(right.kind(), PLUS);

        let TokenAtOffset::Single(token) = root.token_at_offset(TextSize::new(5)) else {
            panic!("expected the last token at the end offset");
        };
        assert_eq!(token.text(), "b");

        assert!(matches!(root.token_at_offset(TextSize::new(6)), TokenAtOffset::None));
    }

    #[test]
    fn siblings_and_covering_element() {
        let tree = sum();
        let binary = tree.root().first_child().unwrap();
        let lhs = binary.first_child().unwrap();
        let rhs = lhs.next_sibling().unwrap();
        assert_eq!(rhs.kind(), ERROR);
        assert_eq!(rhs.prev_sibling(), Some(lhs));
        assert_eq!(rhs.next_sibling(), None);

        let covering = tree.root().covering_element(TextRange::new(2.into(), 5.into())).unwrap();
        assert_eq!(covering.into_node(), Some(binary));
    }

    #[test]
    fn token_neighbours_include_trivia() {
        let tree = sum();
        let first = tree.tokens().next().unwrap();
        assert_eq!(first.prev_token(), None);

        let mut texts = vec![first.text()];
        let mut token = first;
        while let Some(next) = token.next_token() {
            assert_eq!(next.prev_token(), Some(token));
            texts.push(next.text());
            token = next;
        }
        assert_eq!(texts, ["a", " ", "+", " ", "b"]);
        assert_eq!(token.parent().kind(), ERROR);
    }

    #[test]
    fn debug_tree() {
        let tree = sum();
        assert_eq!(
            tree.root().debug_tree(),
            "ROOT@0..5\n  BINARY@0..5\n    ROOT@0..2\n      ATOM@0..1 \"a\"\n      WS@1..2 \" \"\n    PLUS@2..3 \"+\"\n    WS@3..4 \" \"\n    ERROR@4..5\n      ATOM@4..5 \"b\"\n"
        );
    }

    #[test]
    fn descendants_in_preorder() {
        let tree = sum();
        let kinds: Vec<_> = tree.root().descendants().map(|node| node.kind()).collect();
        assert_eq!(kinds, [ROOT, BINARY, ROOT, ERROR]);
    }
}
