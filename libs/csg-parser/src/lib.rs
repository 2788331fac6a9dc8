//! # CSG Parser
//!
//! Text front end for constructive solid geometry scenes: a parser from CSG
//! text to a structured document, the inverse printer, and a round-trip
//! validator.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Value (document)
//! Value → Printer → Source Text
//! Value ↔ JSON (.csgjs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::{parse, keys, Value};
//!
//! let document = parse("sphere(r=1);").unwrap();
//! let contents = document.get(keys::CONTENTS).and_then(Value::as_array).unwrap();
//! assert_eq!(contents[0].node_type(), Some("sphere"));
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! csg-parser → csg-tree → consumers (renderers, exporters)
//! ```

pub mod diagnostic;
pub mod error;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;
pub mod validate;
pub mod value;

// Re-export public API
pub use diagnostic::{Diagnostic, Severity};
pub use error::{CsgError, ParseError, ParseErrorKind, Rule, WriteError};
pub use io::{parse_file, parse_json, parse_json_file, write_file, write_json_file};
pub use parser::{Parsed, Version};
pub use printer::{print, print_with_config};
pub use span::{Position, Span};
pub use validate::validate;
pub use value::{keys, Map, Value};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse CSG source text into a file document.
///
/// ## Example
///
/// ```rust
/// use csg_parser::parse;
///
/// assert!(parse("cube(size = [1, 1, 1]);").is_ok());
/// assert!(parse("cube(size = );").is_err());
/// ```
pub fn parse(source: &str) -> Result<Value, ParseError> {
    parse_partial(source).into_result()
}

/// Parse CSG source text, keeping the partial document on error.
///
/// ## Example
///
/// ```rust
/// use csg_parser::{parse_partial, keys, Value};
///
/// let parsed = parse_partial("cube(); sphere(r = );");
/// assert!(parsed.error.is_some());
/// let contents = parsed.document.get(keys::CONTENTS).and_then(Value::as_array).unwrap();
/// assert_eq!(contents.len(), 1);
/// ```
pub fn parse_partial(source: &str) -> Parsed {
    let tokens = lexer::Lexer::new(source).tokenize();
    parser::Parser::new(tokens).parse()
}
