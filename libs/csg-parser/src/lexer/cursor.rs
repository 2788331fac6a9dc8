//! # Character Cursor
//!
//! Peekable character cursor for the lexer.
//! Tracks position (byte, character index, line, column) as it advances.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("cube");
//! assert_eq!(cursor.peek(), Some('c'));
//! cursor.advance();
//! assert_eq!(cursor.position().byte, 1);
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current character offset.
    index: usize,
    /// Current line (0-indexed).
    line: usize,
    /// Current column (0-indexed).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            index: 0,
            line: 0,
            column: 0,
        }
    }

    /// Get current position.
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.index, self.line, self.column)
    }

    /// Check if at end of file.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    /// Peek at next character (one ahead of current).
    pub fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Peek `n` characters ahead of current.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.byte..].chars().nth(n)
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at EOF
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.byte += c.len_utf8();
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance while predicate is true.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Source text from `start` up to the current position.
    pub fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.byte..self.byte]
    }
}

// =============================================================================
// TESTS
// =============================================================================
