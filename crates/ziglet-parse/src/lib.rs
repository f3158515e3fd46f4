//! Error-tolerant parsers for Zig and Zon.
//!
//! Both entry points always produce a tree spanning the whole text; problems
//! are reported as `ERROR` nodes plus [`Diagnostic`]s.

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

use std::fmt;

use ziglet_errors::Diagnostic;
use ziglet_syntax::ast::AstNode as _;
use ziglet_syntax::ast::{zig as zig_ast, zon as zon_ast};
use ziglet_syntax::{zig, zon};
use ziglet_tokenizer::Tokenizer;
use ziglet_tree::{Kind, SyntaxNode, SyntaxTree};

/// A syntax tree together with the diagnostics found while building it.
pub struct Parse<K> {
    tree: SyntaxTree<K>,
    diagnostics: Vec<Diagnostic>,
}

impl<K: Kind> Parse<K> {
    pub fn tree(&self) -> &SyntaxTree<K> {
        &self.tree
    }

    pub fn syntax(&self) -> SyntaxNode<'_, K> {
        self.tree.root()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<K: Kind> fmt::Debug for Parse<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parse")
            .field("tree", &self.tree)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

unsafe impl<K: Kind> salsa::Update for Parse<K> {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old = unsafe { &mut *old_pointer };
        let tree_changed = unsafe { salsa::Update::maybe_update(&mut old.tree, new_value.tree) };
        old.diagnostics = new_value.diagnostics;
        tree_changed
    }
}

impl Parse<zig::SyntaxKind> {
    pub fn source_file(&self) -> Option<zig_ast::SourceFile<'_>> {
        zig_ast::SourceFile::cast(self.syntax())
    }
}

impl Parse<zon::SyntaxKind> {
    pub fn file(&self) -> Option<zon_ast::File<'_>> {
        zon_ast::File::cast(self.syntax())
    }
}

/// Texts longer than `u32::MAX` bytes are rejected by the lexer with a panic.
pub fn parse_zig(text: &str) -> Parse<zig::SyntaxKind> {
    let _span = tracing::debug_span!("parse_zig", len = text.len()).entered();

    let tokens = Tokenizer::new(text, ziglet_tokenizer::zig::Lexer::new(text)).collect();
    let mut parser = parser::Parser::new(text, tokens);
    grammar::zig::items::source_file(&mut parser);
    let (tree, diagnostics) = parser.build_tree();

    tracing::debug!(nodes = tree.node_count(), diagnostics = diagnostics.len(), "parsed zig");
    Parse { tree, diagnostics }
}

/// Texts longer than `u32::MAX` bytes are rejected by the lexer with a panic.
pub fn parse_zon(text: &str) -> Parse<zon::SyntaxKind> {
    let _span = tracing::debug_span!("parse_zon", len = text.len()).entered();

    let tokens = Tokenizer::new(text, ziglet_tokenizer::zon::Lexer::new(text)).collect();
    let mut parser = parser::Parser::new(text, tokens);
    grammar::zon::file(&mut parser);
    let (tree, mut diagnostics) = parser.build_tree();
    diagnostics.extend(duplicate_keys(&tree));

    tracing::debug!(nodes = tree.node_count(), diagnostics = diagnostics.len(), "parsed zon");
    Parse { tree, diagnostics }
}

/// Warnings for every repeated key after its first occurrence.
fn duplicate_keys(tree: &zon::SyntaxTree) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    zon_ast::walk(tree.root(), |node| {
        let zon_ast::AnyNode::Struct(strukt) = node else {
            return;
        };
        for entry in strukt.duplicate_keys() {
            let Some(key) = entry.key() else {
                continue;
            };
            let message = format!("duplicate field `{}`", key.value());
            diagnostics.push(Diagnostic::warning(message, key.syntax().trimmed_range()));
        }
    });
    diagnostics
}
