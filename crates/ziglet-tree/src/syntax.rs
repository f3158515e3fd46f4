//! Public syntax tree API built on immutable, parent-linked nodes.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use text_size::{TextRange, TextSize};

use crate::Kind;

/// Raw node stored in the tree arena.
pub(crate) struct NodeData<K> {
    pub(crate) kind: K,
    pub(crate) parent: Option<u32>,
    pub(crate) index_in_parent: u32,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    /// Half-open range of token indices spanned by the node.
    pub(crate) first_token: u32,
    pub(crate) end_token: u32,
}

/// Raw token stored in the tree arena. Trivia is stored as ordinary tokens.
pub(crate) struct TokenData<K> {
    pub(crate) kind: K,
    pub(crate) end: TextSize,
    pub(crate) parent: u32,
}

#[derive(Clone, Copy)]
pub(crate) enum Child {
    Node(u32),
    Token(u32),
}

/// Owned syntax tree for a single source text.
pub struct SyntaxTree<K> {
    pub(crate) text: Box<str>,
    /// Always starts with a fake token.
    pub(crate) tokens: Box<[TokenData<K>]>,
    pub(crate) nodes: Box<[NodeData<K>]>,
    pub(crate) children: Box<[Child]>,
}

impl<K: Kind> SyntaxTree<K> {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_, K> {
        SyntaxNode { tree: self, id: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over every token of the tree, trivia included, in text order.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'_, K>> + '_ {
        (1..self.tokens.len() as u32).map(move |id| SyntaxToken { tree: self, id })
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn node(&self, id: u32) -> &NodeData<K> {
        &self.nodes[id as usize]
    }

    #[inline]
    fn token(&self, id: u32) -> &TokenData<K> {
        &self.tokens[id as usize]
    }
}

impl<K: Kind> fmt::Debug for SyntaxTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text().len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

unsafe impl<K: Kind> salsa::Update for SyntaxTree<K> {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if old_value.text() == new_value.text() {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

/// Token handle tied to the lifetime of the tree.
pub struct SyntaxToken<'a, K> {
    tree: &'a SyntaxTree<K>,
    id: u32,
}

impl<K> Clone for SyntaxToken<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SyntaxToken<'_, K> {}

impl<'a, K: Kind> SyntaxToken<'a, K> {
    #[inline]
    fn data(self) -> &'a TokenData<K> {
        self.tree.token(self.id)
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> K {
        self.data().kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the token text range.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let start = self.tree.token(self.id - 1).end;
        TextRange::new(start, self.data().end)
    }

    /// Returns the token text.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the previous token (trivia included) if any.
    #[inline]
    pub fn prev_token(self) -> Option<Self> {
        (self.id > 1).then(|| Self { tree: self.tree, id: self.id - 1 })
    }

    /// Returns the next token (trivia included) if any.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        let id = self.id + 1;
        ((id as usize) < self.tree.tokens.len()).then_some(Self { tree: self.tree, id })
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a, K> {
        SyntaxNode { tree: self.tree, id: self.data().parent }
    }

    /// Returns an iterator of parent nodes, starting from the immediate parent.
    #[inline]
    pub fn parent_ancestors(self) -> impl Iterator<Item = SyntaxNode<'a, K>> + Clone {
        self.parent().ancestors()
    }
}

impl<K> PartialEq for SyntaxToken<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K> Eq for SyntaxToken<'_, K> {}

impl<K> Hash for SyntaxToken<'_, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl<K: Kind> fmt::Debug for SyntaxToken<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl<K: Kind> fmt::Display for SyntaxToken<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node handle tied to the lifetime of the tree.
pub struct SyntaxNode<'a, K> {
    tree: &'a SyntaxTree<K>,
    id: u32,
}

impl<K> Clone for SyntaxNode<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SyntaxNode<'_, K> {}

impl<'a, K: Kind> SyntaxNode<'a, K> {
    #[inline]
    fn data(self) -> &'a NodeData<K> {
        self.tree.node(self.id)
    }

    #[inline]
    fn child_slice(self) -> &'a [Child] {
        let data = self.data();
        let start = data.children_start as usize;
        &self.tree.children[start..start + data.children_len as usize]
    }

    #[inline]
    fn element(self, child: Child) -> SyntaxElement<'a, K> {
        match child {
            Child::Node(id) => NodeOrToken::Node(SyntaxNode { tree: self.tree, id }),
            Child::Token(id) => NodeOrToken::Token(SyntaxToken { tree: self.tree, id }),
        }
    }

    /// Returns the tree this node belongs to.
    #[inline]
    pub fn tree(self) -> &'a SyntaxTree<K> {
        self.tree
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> K {
        self.data().kind
    }

    /// Returns the first token spanned by this node, trivia included.
    #[inline]
    pub fn first_token(self) -> Option<SyntaxToken<'a, K>> {
        let data = self.data();
        (data.first_token < data.end_token)
            .then_some(SyntaxToken { tree: self.tree, id: data.first_token })
    }

    /// Returns the text range covered by this node.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let data = self.data();
        let start = self.tree.token(data.first_token - 1).end;
        let end = self.tree.token(data.end_token - 1).end.max(start);
        TextRange::new(start, end)
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn trimmed_range(self) -> TextRange {
        let mut tokens = self.tokens().filter(|token| !token.is_trivia());
        match (tokens.next(), tokens.next_back()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.text_range().start(), last.text_range().end())
            }
            (Some(only), None) => only.text_range(),
            _ => TextRange::empty(self.text_range().start()),
        }
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the text slice excluding leading/trailing trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    /// Iterates over every token spanned by this node, in text order.
    pub fn tokens(self) -> impl DoubleEndedIterator<Item = SyntaxToken<'a, K>> + Clone + 'a {
        let data = self.data();
        let tree = self.tree;
        (data.first_token..data.end_token).map(move |id| SyntaxToken { tree, id })
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, id: self.data().parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a, K>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates children including tokens.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a, K> {
        ChildrenWithTokens { node: self, children: self.child_slice().iter() }
    }

    /// Iterates child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> Children<'a, K> {
        Children { inner: self.children_with_tokens() }
    }

    pub fn first_child(self) -> Option<Self> {
        self.children().next()
    }

    /// Returns the next sibling node, skipping tokens.
    pub fn next_sibling(self) -> Option<Self> {
        let parent = self.parent()?;
        let index = self.data().index_in_parent as usize;
        parent.child_slice()[index + 1..].iter().find_map(|&child| match child {
            Child::Node(id) => Some(Self { tree: self.tree, id }),
            Child::Token(_) => None,
        })
    }

    /// Returns the previous sibling node, skipping tokens.
    pub fn prev_sibling(self) -> Option<Self> {
        let parent = self.parent()?;
        let index = self.data().index_in_parent as usize;
        parent.child_slice()[..index].iter().rev().find_map(|&child| match child {
            Child::Node(id) => Some(Self { tree: self.tree, id }),
            Child::Token(_) => None,
        })
    }

    /// Returns all nodes of this subtree in preorder, starting with `self`.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a, K>> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    /// Returns the token at the given offset, if any.
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a, K>> {
        let range = self.text_range();
        if !range.contains_inclusive(offset) {
            return TokenAtOffset::None;
        }

        let data = self.data();
        let tokens = &self.tree.tokens[data.first_token as usize..data.end_token as usize];
        if tokens.is_empty() {
            return TokenAtOffset::None;
        }

        let index = tokens.partition_point(|token| token.end <= offset);
        if index == tokens.len() {
            return TokenAtOffset::Single(SyntaxToken { tree: self.tree, id: data.end_token - 1 });
        }

        let token = SyntaxToken { tree: self.tree, id: data.first_token + index as u32 };
        if index > 0 && token.text_range().start() == offset {
            TokenAtOffset::Between(SyntaxToken { tree: self.tree, id: token.id - 1 }, token)
        } else {
            TokenAtOffset::Single(token)
        }
    }

    /// Returns the smallest element that fully covers `range`.
    pub fn covering_element(self, range: TextRange) -> Option<SyntaxElement<'a, K>> {
        if !self.text_range().contains_range(range) {
            return None;
        }

        let Some(token) = self.token_at_offset(range.start()).right_biased() else {
            return Some(NodeOrToken::Node(self));
        };
        if token.text_range().contains_range(range) {
            return Some(NodeOrToken::Token(token));
        }

        token
            .parent_ancestors()
            .find(|ancestor| ancestor.text_range().contains_range(range))
            .map(NodeOrToken::Node)
    }

    /// Returns a preorder iterator over nodes.
    #[inline]
    pub fn preorder(self) -> Preorder<'a, K> {
        Preorder::new(self)
    }

    /// Returns a preorder iterator over nodes and tokens.
    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a, K> {
        PreorderWithTokens::new(self)
    }

    /// Renders the subtree in an indented `KIND@range "text"` form.
    pub fn debug_tree(self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    _ = writeln!(
                        out,
                        "{:indent$}{:?}@{:?}",
                        "",
                        node.kind(),
                        node.text_range(),
                        indent = depth * 2
                    );
                    depth += 1;
                }
                WalkEventWithTokens::LeaveNode(_) => depth -= 1,
                WalkEventWithTokens::Token(token) => {
                    _ = writeln!(out, "{:indent$}{token:?}", "", indent = depth * 2);
                }
            }
        }
        out
    }
}

impl<K> PartialEq for SyntaxNode<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K> Eq for SyntaxNode<'_, K> {}

impl<K> Hash for SyntaxNode<'_, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl<K: Kind> fmt::Debug for SyntaxNode<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl<K: Kind> fmt::Display for SyntaxNode<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a, K> = NodeOrToken<SyntaxNode<'a, K>, SyntaxToken<'a, K>>;

impl<'a, K: Kind> SyntaxElement<'a, K> {
    pub fn kind(self) -> K {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

/// Iterator over children including tokens.
pub struct ChildrenWithTokens<'a, K> {
    node: SyntaxNode<'a, K>,
    children: std::slice::Iter<'a, Child>,
}

impl<K> Clone for ChildrenWithTokens<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        Self { node: self.node, children: self.children.clone() }
    }
}

impl<'a, K: Kind> Iterator for ChildrenWithTokens<'a, K> {
    type Item = SyntaxElement<'a, K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.children.next().map(|&child| self.node.element(child))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl<K: Kind> DoubleEndedIterator for ChildrenWithTokens<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.children.next_back().map(|&child| self.node.element(child))
    }
}

impl<K: Kind> ExactSizeIterator for ChildrenWithTokens<'_, K> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Iterator over child nodes only.
pub struct Children<'a, K> {
    inner: ChildrenWithTokens<'a, K>,
}

impl<K> Clone for Children<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<'a, K: Kind> Iterator for Children<'a, K> {
    type Item = SyntaxNode<'a, K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(NodeOrToken::into_node)
    }
}

impl<K: Kind> DoubleEndedIterator for Children<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().rev().find_map(NodeOrToken::into_node)
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a, K> {
    inner: PreorderWithTokens<'a, K>,
}

impl<'a, K: Kind> Preorder<'a, K> {
    #[inline]
    fn new(start: SyntaxNode<'a, K>) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }
}

impl<'a, K: Kind> Iterator for Preorder<'a, K> {
    type Item = WalkEvent<'a, K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Copy)]
pub enum WalkEvent<'a, K> {
    Enter(SyntaxNode<'a, K>),
    Leave(SyntaxNode<'a, K>),
}

/// Preorder traversal over nodes and tokens.
pub struct PreorderWithTokens<'a, K> {
    stack: Vec<(SyntaxNode<'a, K>, ChildrenWithTokens<'a, K>)>,
    root: Option<SyntaxNode<'a, K>>,
}

impl<K> Clone for PreorderWithTokens<'_, K> {
    fn clone(&self) -> Self {
        Self { stack: self.stack.clone(), root: self.root }
    }
}

impl<'a, K: Kind> PreorderWithTokens<'a, K> {
    #[inline]
    fn new(start: SyntaxNode<'a, K>) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }
}

impl<'a, K: Kind> Iterator for PreorderWithTokens<'a, K> {
    type Item = WalkEventWithTokens<'a, K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy)]
pub enum WalkEventWithTokens<'a, K> {
    EnterNode(SyntaxNode<'a, K>),
    LeaveNode(SyntaxNode<'a, K>),
    Token(SyntaxToken<'a, K>),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }
}

impl<T> Iterator for TokenAtOffset<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::None) {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, right) => {
                *self = Self::Single(right);
                Some(left)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::None => (0, Some(0)),
            Self::Single(_) => (1, Some(1)),
            Self::Between(_, _) => (2, Some(2)),
        }
    }
}

impl<T> ExactSizeIterator for TokenAtOffset<T> {}
