//! Syntax kinds and typed nodes of Zig and Zon.
//!
//! [`zig`] and [`zon`] define the closed kind enums of each language and
//! instantiate the generic tree types from `ziglet-tree` for them. [`ast`]
//! layers typed wrappers over raw nodes together with the derived queries
//! consumers need: decoded identifier values, string literal contents and
//! the keys of Zon structs.

pub mod ast;
pub mod zig;
pub mod zon;

pub use ziglet_tree::{Kind, NodeOrToken, TextRange, TextSize, TriviaPiece, WalkEvent};
