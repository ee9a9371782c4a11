//! Bracket-tree builder for PDDL
//!
//! Builds a rowan GreenNode tree whose shape mirrors bracket nesting.
//! Recovers from unmatched brackets and produces a lossless tree: every
//! token, including trivia, is attached in document order.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use crate::base::{LineCol, LineIndex};

use super::lexer::Lexer;
use super::syntax_kind::SyntaxKind;

/// Parse result containing the green tree, accumulated problems, and the
/// line index built from the same text
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub problems: Vec<ParsingProblem>,
    pub line_index: LineIndex,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without problems
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// A recoverable problem found while parsing
///
/// Problems never abort a parse; the tree is still built and usable. The
/// line/column pair is resolved at construction so consumers can report
/// locations without holding on to the line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingProblem {
    pub message: String,
    pub range: TextRange,
    pub line: u32,
    pub column: u32,
}

impl ParsingProblem {
    pub fn new(message: impl Into<String>, range: TextRange, line_index: &LineIndex) -> Self {
        // Token ranges always lie within the indexed text
        let LineCol { line, col } = line_index.line_col(range.start()).unwrap_or_default();
        Self {
            message: message.into(),
            range,
            line,
            column: col,
        }
    }
}

/// Parse PDDL source text into a lossless bracket tree
///
/// The tree structure follows an explicit stack of open groups: open
/// brackets push, close brackets pop. A close bracket with nothing to close
/// is recorded as a problem and attached in place; groups still open at
/// end-of-input are finished at their partial span, each recording a
/// problem at its opening bracket.
pub fn parse(input: &str) -> Parse {
    let line_index = LineIndex::new(input);
    let mut builder = GreenNodeBuilder::new();
    let mut problems = Vec::new();
    let mut open_brackets: Vec<TextRange> = Vec::new();

    builder.start_node(SyntaxKind::DOCUMENT.into());

    for token in Lexer::new(input) {
        match token.kind {
            SyntaxKind::OPEN_BRACKET | SyntaxKind::OPEN_BRACKET_OP => {
                builder.start_node(SyntaxKind::GROUP.into());
                builder.token(token.kind.into(), token.text);
                open_brackets.push(TextRange::new(token.offset, token.end_offset()));
            }
            SyntaxKind::CLOSE_BRACKET => {
                builder.token(token.kind.into(), token.text);
                if open_brackets.pop().is_some() {
                    builder.finish_node();
                } else {
                    problems.push(ParsingProblem::new(
                        "unmatched closing bracket",
                        TextRange::new(token.offset, token.end_offset()),
                        &line_index,
                    ));
                }
            }
            _ => builder.token(token.kind.into(), token.text),
        }
    }

    while let Some(range) = open_brackets.pop() {
        problems.push(ParsingProblem::new(
            "unmatched open bracket",
            range,
            &line_index,
        ));
        builder.finish_node();
    }

    builder.finish_node();

    Parse {
        green: builder.finish(),
        problems,
        line_index,
    }
}
