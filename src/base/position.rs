//! Line/column positions for model objects.
//!
//! Offsets ([`text_size::TextSize`]) are the working currency of the parser;
//! positions are the editor-facing form derived from them through
//! [`LineIndex`](super::LineIndex). Both are 0-indexed for LSP compatibility.

use std::fmt;

/// A position in source text (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in source text between two [`Position`]s (end inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates.
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let span = Span::from_coords(1, 4, 3, 2);

        assert!(span.contains(Position::new(1, 4)));
        assert!(span.contains(Position::new(2, 0)));
        assert!(span.contains(Position::new(2, 100)));
        assert!(span.contains(Position::new(3, 2)));

        assert!(!span.contains(Position::new(1, 3)));
        assert!(!span.contains(Position::new(0, 10)));
        assert!(!span.contains(Position::new(3, 3)));
        assert!(!span.contains(Position::new(4, 0)));
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 1) < Position::new(2, 5));
    }
}
