//! Typed wrappers around the raw syntax trees.
//!
//! Every node kind of a language has a wrapper struct; the per-language
//! `AnyNode` enum is the closed union of them and is what visitors match on.

use ziglet_tree::{Kind, SyntaxNode, SyntaxToken};

mod string;

pub use string::unescape;

/// Conversion between a raw node and its typed wrapper.
pub trait AstNode<'a>: Copy + Sized {
    type Kind: Kind;

    fn can_cast(kind: Self::Kind) -> bool;

    fn cast(syntax: SyntaxNode<'a, Self::Kind>) -> Option<Self>;

    fn syntax(self) -> SyntaxNode<'a, Self::Kind>;
}

macro_rules! ast_nodes {
    ($($(#[$meta:meta])* $name:ident => $kind:ident,)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub struct $name<'a>(SyntaxNode<'a>);

            impl<'a> AstNode<'a> for $name<'a> {
                type Kind = SyntaxKind;

                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$kind
                }

                fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then_some(Self(syntax))
                }

                fn syntax(self) -> SyntaxNode<'a> {
                    self.0
                }
            }
        )*

        /// Closed union of every typed node of the language.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum AnyNode<'a> {
            $($name($name<'a>),)*
        }

        impl<'a> AnyNode<'a> {
            pub fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                match syntax.kind() {
                    $(SyntaxKind::$kind => Some(Self::$name($name(syntax))),)*
                    _ => None,
                }
            }

            pub fn syntax(self) -> SyntaxNode<'a> {
                match self {
                    $(Self::$name(it) => it.0,)*
                }
            }
        }

        /// Visits every typed node below and including `root` in preorder.
        pub fn walk<'a>(root: SyntaxNode<'a>, mut visit: impl FnMut(AnyNode<'a>)) {
            for node in root.descendants() {
                if let Some(node) = AnyNode::cast(node) {
                    visit(node);
                }
            }
        }
    };
}

pub mod zig;
pub mod zon;

/// First direct child node that casts to `N`.
fn child<'a, N: AstNode<'a>>(parent: SyntaxNode<'a, N::Kind>) -> Option<N> {
    parent.children().find_map(N::cast)
}

/// Direct child nodes that cast to `N`.
fn children<'a, N: AstNode<'a> + 'a>(
    parent: SyntaxNode<'a, N::Kind>,
) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

/// First direct child token of the given kind.
fn token<K: Kind>(parent: SyntaxNode<'_, K>, kind: K) -> Option<SyntaxToken<'_, K>> {
    parent.children_with_tokens().filter_map(|it| it.into_token()).find(|it| it.kind() == kind)
}

/// First direct child node following a direct child token of `kind`.
fn node_after<K: Kind>(parent: SyntaxNode<'_, K>, kind: K) -> Option<SyntaxNode<'_, K>> {
    parent
        .children_with_tokens()
        .skip_while(|it| it.as_token().is_none_or(|token| token.kind() != kind))
        .find_map(|it| it.into_node())
}
