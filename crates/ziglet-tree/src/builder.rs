//! Incremental builder for the immutable syntax tree.

use text_size::{TextLen, TextSize};

use crate::syntax::{Child, NodeData, TokenData};
use crate::{Kind, SyntaxTree, TriviaPiece};

/// Builds a `SyntaxTree` from parser events.
pub struct Builder<K: Kind> {
    text: Box<str>,
    nodes: Vec<NodeData<K>>,
    children: Vec<Child>,
    tokens: Vec<TokenData<K>>,

    children_pool: Vec<Vec<Child>>,
    opened: Vec<Opened>,
    text_len: TextSize,
}

struct Opened {
    node: u32,
    children: Vec<Child>,
}

impl<K: Kind> Drop for Builder<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 10;

impl<K: Kind> Builder<K> {
    /// Creates a new builder for `text`.
    ///
    /// The token buffer is seeded with a fake token at index 0 so that every
    /// real token can read its start offset from its predecessor.
    pub fn new(text: &str) -> Self {
        let mut tokens = Vec::with_capacity(DEFAULT_TREE_SIZE);
        tokens.push(TokenData {
            kind: K::TOMBSTONE,
            end: TextSize::new(0),
            parent: 0,
        });

        Self {
            text: text.into(),
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens,

            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    /// Retrieves a recycled children buffer or allocates a new one.
    fn new_children_vec(&mut self) -> Vec<Child> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    #[track_caller]
    fn last_opened(&mut self) -> &mut Opened {
        self.opened.last_mut().expect("no opened nodes?")
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: K) {
        let id = index(self.nodes.len());
        let (parent, index_in_parent) = match self.opened.last_mut() {
            Some(parent) => {
                let index_in_parent = index(parent.children.len());
                parent.children.push(Child::Node(id));
                (Some(parent.node), index_in_parent)
            }
            None => {
                assert!(self.nodes.is_empty(), "a syntax tree has exactly one root");
                (None, 0)
            }
        };

        let first_token = index(self.tokens.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            index_in_parent,
            children_start: 0,
            children_len: 0,
            first_token,
            end_token: first_token,
        });

        let children = self.new_children_vec();
        self.opened.push(Opened { node: id, children });
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let Opened { node, mut children } = self.opened.pop().expect("no opened nodes?");

        let node = &mut self.nodes[node as usize];
        node.children_start = index(self.children.len());
        node.children_len = index(children.len());
        node.end_token = index(self.tokens.len());

        self.children.append(&mut children);
        self.children_pool.push(children);
    }

    /// Adds a token with its leading and trailing trivia to the current node.
    pub fn token(
        &mut self,
        leading_trivia: impl IntoIterator<Item = TriviaPiece<K>>,
        kind: K,
        text_len: TextSize,
        trailing_trivia: impl IntoIterator<Item = TriviaPiece<K>>,
    ) {
        for piece in leading_trivia {
            self.push_token(piece.kind, piece.len);
        }
        self.push_token(kind, text_len);
        for piece in trailing_trivia {
            self.push_token(piece.kind, piece.len);
        }
    }

    #[track_caller]
    fn push_token(&mut self, kind: K, len: TextSize) {
        self.text_len += len;
        assert!(
            self.text.is_char_boundary(usize::from(self.text_len)),
            "token ends outside of the text or inside a character"
        );

        let id = index(self.tokens.len());
        let end = self.text_len;
        let opened = self.last_opened();
        let parent = opened.node;
        opened.children.push(Child::Token(id));

        self.tokens.push(TokenData { kind, end, parent });
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    #[track_caller]
    pub fn finish(mut self) -> SyntaxTree<K> {
        assert!(self.opened.is_empty(), "unbalanced `start_node`/`finish_node` calls");
        assert!(!self.nodes.is_empty(), "a syntax tree needs a root node");
        assert_eq!(self.text_len, self.text.text_len(), "tokens must cover the whole text");

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            children: std::mem::take(&mut self.children).into_boxed_slice(),
        }
    }
}

#[inline]
#[track_caller]
fn index(len: usize) -> u32 {
    u32::try_from(len).expect("syntax tree is too large")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestKind::{self, *};

    fn piece(kind: TestKind, len: u32) -> TriviaPiece<TestKind> {
        TriviaPiece::new(kind, len.into())
    }

    #[test]
    fn builds_nested_nodes() {
        let text = " a+b";
        let mut builder = Builder::new(text);
        builder.start_node(ROOT);
        builder.start_node(BINARY);
        builder.token([piece(WS, 1)], ATOM, 1.into(), []);
        builder.token([], PLUS, 1.into(), []);
        builder.token([], ATOM, 1.into(), []);
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let root = tree.root();
        assert_eq!(root.kind(), ROOT);
        assert_eq!(root.text(), text);

        let binary = root.first_child().unwrap();
        assert_eq!(binary.kind(), BINARY);
        assert_eq!(binary.parent(), Some(root));
        assert_eq!(binary.children_with_tokens().count(), 4);
        assert_eq!(binary.text_trimmed(), "a+b");
    }

    #[test]
    fn empty_node_has_empty_range() {
        let text = "a";
        let mut builder = Builder::new(text);
        builder.start_node(ROOT);
        builder.token([], ATOM, 1.into(), []);
        builder.start_node(ERROR);
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let error = tree.root().first_child().unwrap();
        assert_eq!(error.kind(), ERROR);
        assert!(error.text_range().is_empty());
        assert_eq!(error.text_range().start(), TextSize::new(1));
        assert!(error.first_token().is_none());
    }

    #[test]
    #[should_panic(expected = "tokens must cover the whole text")]
    fn finish_requires_full_coverage() {
        let mut builder = Builder::new("ab");
        builder.start_node(ROOT);
        builder.token([], ATOM, 1.into(), []);
        builder.finish_node();
        builder.finish();
    }
}
