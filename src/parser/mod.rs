//! Rowan-based lossless parser for PDDL
//!
//! This module provides a lossless bracket-tree parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The tree preserves all whitespace and comments; the semantic model is
//! extracted on top of it.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, `(`+operator fused
//!     ↓
//! parse → GreenNode tree mirroring bracket nesting (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers for upward search
//!     ↓
//! Group wrapper → typed accessors for the model extractors
//! ```
//!
//! Parsing never fails: unmatched brackets become [`ParsingProblem`]s and the
//! tree is built from whatever structure the text has, so offset-based
//! lookups keep working inside malformed input.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::{AstNode, Group, GroupItem};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, ParsingProblem, parse};
pub use syntax_kind::{PddlLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
