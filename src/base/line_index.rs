//! Offset ↔ line/column conversion.
//!
//! A [`LineIndex`] is built once per parse from the raw text and answers the
//! many position queries the rest of the pipeline makes. Lookups are a binary
//! search over the precomputed newline table.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::position::{Position, Span};

/// A 0-indexed line/column pair (byte columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Error for position queries outside the indexed document.
///
/// Offsets out of range indicate a caller bug (offsets come from tokens of
/// the same text the index was built from), so this surfaces as a hard
/// failure instead of an accumulated parsing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("offset {offset} is past the end of the document (length {len})")]
    OffsetOutOfBounds { offset: u32, len: u32 },
}

/// Precomputed line table for one text snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineIndex {
    /// Offset of the first character of each line after the first.
    newlines: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| TextSize::new(i as u32 + 1))
            .collect();
        Self {
            newlines,
            len: TextSize::of(text),
        }
    }

    /// Total length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Resolve an offset to its line/column pair.
    pub fn line_col(&self, offset: TextSize) -> Result<LineCol, PositionError> {
        if offset > self.len {
            return Err(PositionError::OffsetOutOfBounds {
                offset: offset.into(),
                len: self.len.into(),
            });
        }
        let line = self.newlines.partition_point(|&start| start <= offset);
        let line_start = if line == 0 {
            TextSize::new(0)
        } else {
            self.newlines[line - 1]
        };
        Ok(LineCol {
            line: line as u32,
            col: (offset - line_start).into(),
        })
    }

    /// Resolve a line/column pair back to an offset.
    ///
    /// Returns `None` for lines past the end of the document or columns past
    /// the end of their line.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let line = pos.line as usize;
        let line_start = if line == 0 {
            TextSize::new(0)
        } else {
            *self.newlines.get(line - 1)?
        };
        let offset = line_start + TextSize::new(pos.col);
        let line_end = self
            .newlines
            .get(line)
            .copied()
            .unwrap_or(self.len + TextSize::new(1));
        (offset < line_end && offset <= self.len).then_some(offset)
    }

    /// Resolve an offset to a [`Position`].
    pub fn position(&self, offset: TextSize) -> Result<Position, PositionError> {
        let lc = self.line_col(offset)?;
        Ok(Position::new(lc.line as usize, lc.col as usize))
    }

    /// Resolve an offset range to a [`Span`] by composing two lookups.
    pub fn span(&self, range: TextRange) -> Result<Span, PositionError> {
        Ok(Span::new(
            self.position(range.start())?,
            self.position(range.end())?,
        ))
    }
}
