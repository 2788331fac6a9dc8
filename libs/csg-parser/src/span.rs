//! # Source Span
//!
//! Positions and ranges in CSG source text, used by tokens and parse errors.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::span::{Position, Span};
//!
//! let span = Span::new(Position::new(5, 5, 0, 5), Position::new(9, 9, 0, 9));
//! assert_eq!(span.offset(), 5);
//! assert_eq!(span.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A location in the source text.
///
/// `byte` and `index` are offsets from the start of the source, in bytes
/// and in characters. `line` and `column` are zero-based and count
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Character offset from the start of the source.
    pub index: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, index: usize, line: usize, column: usize) -> Self {
        Self {
            byte,
            index,
            line,
            column,
        }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A half-open range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Starting position (inclusive).
    pub start: Position,
    /// Ending position (exclusive).
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty span located at a single position.
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Character offset where the span starts.
    #[inline]
    pub fn offset(&self) -> usize {
        self.start.index
    }

    /// Length of the span in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    /// Returns true if the span has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
