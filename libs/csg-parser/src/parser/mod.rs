//! # CSG Parser
//!
//! Recursive descent parser for the CSG text format.
//! Produces a structured document [`Value`].
//!
//! Alternatives are tried in order with backtracking: at each statement the
//! parser first attempts an object (`cube(...);`) and, if that fails, rewinds
//! and attempts an instruction (`union() { ... }`).
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::lexer::Lexer;
//! use csg_parser::parser::Parser;
//!
//! let tokens = Lexer::new("cube(size = [1, 1, 1]);").tokenize();
//! let parsed = Parser::new(tokens).parse();
//! assert!(parsed.error.is_none());
//! ```

mod statements;
mod values;

use crate::error::{ParseError, ParseErrorKind, Rule};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use crate::value::{keys, Value};
use config::constants::{DEFAULT_VERSION_MAJOR, DEFAULT_VERSION_MINOR, DEFAULT_VERSION_NAME};

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Outcome of a lenient parse.
///
/// On failure `document` still holds every complete top-level item parsed
/// before the error.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// File document (`"type": "CSG file"`).
    pub document: Value,
    /// First syntax error, if any.
    pub error: Option<ParseError>,
}

impl Parsed {
    /// Converts into a strict result, discarding the partial document on error.
    pub fn into_result(self) -> Result<Value, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.document),
        }
    }
}

/// Version directive from a `# name major.minor` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub name: String,
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// Reads a version directive from a comment body.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use csg_parser::parser::Version;
    ///
    /// let version = Version::from_comment(" OpenSCAD 2.1").unwrap();
    /// assert_eq!((version.major, version.minor), (2, 1));
    /// assert!(Version::from_comment(" just a note").is_none());
    /// ```
    pub fn from_comment(body: &str) -> Option<Self> {
        let mut fields = body.split_whitespace();
        let name = fields.next()?;
        let number = fields.next()?;
        if fields.next().is_some() {
            return None;
        }

        let (major, minor) = number.split_once('.')?;
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(major) || !is_digits(minor) {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl Default for Version {
    fn default() -> Self {
        Self {
            name: DEFAULT_VERSION_NAME.to_string(),
            major: DEFAULT_VERSION_MAJOR,
            minor: DEFAULT_VERSION_MINOR,
        }
    }
}

/// Saved parser state for backtracking.
#[derive(Debug, Clone)]
struct Checkpoint {
    current: usize,
    version: Option<Version>,
}

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for CSG text.
pub struct Parser {
    /// Token stream, terminated by `Eof`.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Last version directive seen.
    version: Option<Version>,
}

impl Parser {
    /// Create a new parser over a token stream from [`crate::lexer::Lexer`].
    ///
    /// A missing trailing `Eof` token is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, Span::point(end), String::new()));
        }
        Self {
            tokens,
            current: 0,
            version: None,
        }
    }

    /// Parse the whole token stream into a file document.
    ///
    /// Parsing stops at the first syntax error; the returned document holds
    /// the top-level items completed before it.
    pub fn parse(&mut self) -> Parsed {
        let mut contents = Vec::new();
        let mut error = None;

        while !self.is_at_end() {
            match self.parse_item() {
                Ok(Some(node)) => contents.push(node),
                Ok(None) => {}
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        Parsed {
            document: self.file_document(contents),
            error,
        }
    }

    /// Wraps top-level items in the file document.
    fn file_document(&self, contents: Vec<Value>) -> Value {
        let version = self.version.clone().unwrap_or_default();
        Value::object([
            (keys::TYPE, Value::from(keys::FILE_TYPE)),
            (keys::VERSION_NAME, Value::from(version.name)),
            (keys::VERSION_MAJOR, Value::from(version.major)),
            (keys::VERSION_MINOR, Value::from(version.minor)),
            (keys::CONTENTS, Value::Array(contents)),
        ])
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of file.
    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Advance to next token, returning the consumed one.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consume a token of the expected kind or fail within `rule`.
    fn expect(&mut self, kind: TokenKind, rule: Rule) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display(), rule))
        }
    }

    /// Consume token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Builds the error for the current token not matching `expected`.
    fn unexpected(&self, expected: &str, rule: Rule) -> ParseError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, token.span, rule),
            TokenKind::Error => ParseError::new(
                ParseErrorKind::UnexpectedCharacter {
                    found: token.text.clone(),
                },
                token.span,
                rule,
            ),
            TokenKind::UnterminatedString => {
                ParseError::new(ParseErrorKind::UnterminatedString, token.span, rule)
            }
            _ => ParseError::unexpected_token(&token.text, expected, token.span, rule),
        }
    }

    // =========================================================================
    // BACKTRACKING
    // =========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            version: self.version.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.current;
        self.version = checkpoint.version;
    }
}

// =============================================================================
// TESTS
// =============================================================================
