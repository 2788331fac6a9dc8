//! # Errors
//!
//! Error types for the CSG grammar parser, the document printer and file
//! conversion.
//!
//! A parse error names the grammar rule that failed and carries the span of
//! the offending input, so callers can underline it:
//!
//! ```rust
//! use csg_parser::parse;
//!
//! let error = parse("sphere(r=);").unwrap_err();
//! assert_eq!(error.rule.name(), "Value");
//! assert_eq!(error.offset(), 9);
//! ```

use crate::span::Span;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// GRAMMAR RULE
// =============================================================================

/// Grammar rules of the CSG text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    File,
    ObjectList,
    Comment,
    Object,
    Instruction,
    PropertyList,
    Property,
    Matrix,
    Array,
    Value,
    Number,
    String,
    Name,
}

impl Rule {
    /// Rule name as it appears in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::File => "File",
            Rule::ObjectList => "ObjectList",
            Rule::Comment => "Comment",
            Rule::Object => "Object",
            Rule::Instruction => "Instruction",
            Rule::PropertyList => "PropertyList",
            Rule::Property => "Property",
            Rule::Matrix => "Matrix",
            Rule::Array => "Array",
            Rule::Value => "Value",
            Rule::Number => "Number",
            Rule::String => "String",
            Rule::Name => "Name",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A grammar mismatch with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of the offending input.
    pub span: Span,
    /// Rule that failed to match.
    pub rule: Rule,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span, rule: Rule) -> Self {
        Self { kind, span, rule }
    }

    /// Create unexpected token error.
    pub fn unexpected_token(found: &str, expected: &str, span: Span, rule: Rule) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            span,
            rule,
        )
    }

    /// Create unexpected EOF error.
    pub fn unexpected_eof(expected: &str, span: Span, rule: Rule) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            span,
            rule,
        )
    }

    /// Character offset where the failing input starts.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Length in characters of the failing input.
    pub fn length(&self) -> usize {
        self.span.len()
    }

    /// Renders a two-line excerpt pointing at the failing input.
    ///
    /// ```text
    /// sphere(r=);
    ///          ~^
    /// ```
    pub fn excerpt(&self, source: &str) -> String {
        let line = source.lines().nth(self.span.start.line).unwrap_or_default();
        let mut marker = " ".repeat(self.span.start.column);
        marker.push_str(&"~".repeat(self.length().saturating_sub(1)));
        marker.push('^');
        format!("{}\n{}", line, marker)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} while parsing {} at offset {} (line {}, column {})",
            self.kind,
            self.rule,
            self.span.start.index,
            self.span.start.line + 1,
            self.span.start.column + 1
        )
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Found unexpected token.
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Unexpected end of file.
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// Character that cannot start any token.
    UnexpectedCharacter {
        /// The offending text.
        found: String,
    },

    /// Invalid number literal.
    InvalidNumber {
        /// The invalid text.
        text: String,
    },

    /// Unterminated string literal.
    UnterminatedString,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token '{}', expected {}", found, expected)
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of file, expected {}", expected)
            }
            Self::UnexpectedCharacter { found } => {
                write!(f, "unexpected character '{}'", found)
            }
            Self::InvalidNumber { text } => {
                write!(f, "invalid number '{}'", text)
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
        }
    }
}

// =============================================================================
// WRITE ERROR
// =============================================================================

/// Errors raised while rendering a document to CSG text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    /// A `null` appeared where a node was expected.
    #[error("unexpected null where a node was expected")]
    UnexpectedNull,

    /// A scalar appeared where a node object was expected.
    #[error("expected a node object, found {0}")]
    DictionaryExpected(String),

    /// Node type is missing or not a known CSG construct.
    #[error("unknown node type: {0}")]
    UnknownType(String),

    /// `properties` is neither a map nor absent.
    #[error("properties of '{node_type}' must be a map, found {found}")]
    PropertiesNotMap { node_type: String, found: String },

    /// `objects` is neither an array nor absent.
    #[error("objects of '{node_type}' must be an array, found {found}")]
    ObjectsNotArray { node_type: String, found: String },

    /// A binary boolean instruction has fewer children than required.
    #[error("'{node_type}' needs at least {expected} children, found {found}")]
    TooFewChildren {
        node_type: String,
        expected: usize,
        found: usize,
    },

    /// A property value that has no CSG text form.
    #[error("unsupported property value: {0}")]
    UnsupportedValue(String),
}

impl WriteError {
    pub fn dictionary_expected(found: impl Into<String>) -> Self {
        Self::DictionaryExpected(found.into())
    }

    pub fn unknown_type(node_type: impl Into<String>) -> Self {
        Self::UnknownType(node_type.into())
    }

    pub fn unsupported_value(value: impl Into<String>) -> Self {
        Self::UnsupportedValue(value.into())
    }
}

// =============================================================================
// CONVERSION ERROR
// =============================================================================

/// Errors from reading or writing `.csg` and `.csgjs` files.
#[derive(Debug, Error)]
pub enum CsgError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Write(#[from] WriteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CsgError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            Position::new(start, start, 0, start),
            Position::new(end, end, 0, end),
        )
    }

    #[test]
    fn test_unexpected_token_display() {
        let error = ParseError::unexpected_token(")", "value", span(9, 10), Rule::Value);
        let msg = error.to_string();
        assert!(msg.contains("unexpected token ')'"));
        assert!(msg.contains("while parsing Value"));
        assert!(msg.contains("offset 9"));
    }

    #[test]
    fn test_unexpected_eof_display() {
        let error = ParseError::unexpected_eof("';'", span(4, 4), Rule::Object);
        assert!(error.to_string().contains("unexpected end of file"));
        assert_eq!(error.length(), 0);
    }

    #[test]
    fn test_write_error_display() {
        let error = WriteError::TooFewChildren {
            node_type: "union".to_string(),
            expected: 2,
            found: 1,
        };
        assert_eq!(error.to_string(), "'union' needs at least 2 children, found 1");
        assert!(WriteError::unknown_type("torus").to_string().contains("torus"));
    }

    #[test]
    fn test_csg_error_wraps_parse_error() {
        let parse = ParseError::unexpected_eof("';'", span(4, 4), Rule::Object);
        let error = CsgError::from(parse);
        assert!(error.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn test_excerpt_underlines_span() {
        let error = ParseError::unexpected_token("xyz", "value", span(2, 5), Rule::Value);
        assert_eq!(error.excerpt("a(xyz);"), "a(xyz);\n  ~~^");
    }
}
