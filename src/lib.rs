//! # pddl-base
//!
//! Core library for PDDL parsing, syntax trees, and semantic analysis.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → semantic model: DomainInfo/ProblemInfo, declared variables,
//!             constraints, effects, reference classification
//!   ↓
//! parser    → Logos lexer, bracket-tree builder on rowan, Group wrapper
//!   ↓
//! base      → Primitives (LineIndex, Position, Span)
//! ```
//!
//! The pipeline is a pure function of the input text: tokenize, build a
//! lossless bracket tree, then extract the domain or problem model. Malformed
//! input degrades to a partial model plus a list of
//! [`ParsingProblem`](parser::ParsingProblem)s, never a hard failure.
//! Semantic queries ([`ModelHierarchy`](model::ModelHierarchy)) run on demand
//! against the tree of an existing parse.

// ============================================================================
// MODULES (dependency order: base → parser → model)
// ============================================================================

/// Foundation types: LineIndex, Position, Span
pub mod base;

/// Parser: Logos lexer, bracket-nesting tree builder, typed Group wrapper
pub mod parser;

/// Semantic model: domain/problem info, variables, constraints, effects,
/// reference classification
pub mod model;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, PositionError, Span};

// Re-export the parser surface
pub use parser::{Parse, ParsingProblem, SyntaxKind, SyntaxNode, SyntaxToken};

// Re-export the semantic model surface
pub use model::{
    Constraint, DomainInfo, Effect, ModelHierarchy, PddlFile, ProblemInfo, Structure,
    StructurePart, TimeQualifier, Variable, VariableReferenceInfo, VariableReferenceKind,
};
