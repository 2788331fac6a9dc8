//! # Tokens
//!
//! Token types for the CSG lexer.

use crate::span::Span;

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
///
/// For strings, `text` holds the content between the quotes; for comments,
/// the text after `#` up to the end of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens in the CSG text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Number literal like `10`, `-0.5` or `1e-3`
    Number,
    /// String literal like `"label"`
    String,
    /// Boolean true
    True,
    /// Boolean false
    False,

    /// Name like `cube` or `$fn`
    Name,

    /// `#` comment, possibly a version directive
    Comment,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `=`
    Eq,

    // Special
    /// String literal missing its closing quote
    UnterminatedString,
    /// Character that cannot start a token
    Error,
    /// End of file
    Eof,
}

impl TokenKind {
    /// Human-readable description used in "expected ..." messages.
    pub fn display(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Name => "name",
            TokenKind::Comment => "comment",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eq => "'='",
            TokenKind::UnterminatedString => "unterminated string",
            TokenKind::Error => "invalid character",
            TokenKind::Eof => "end of file",
        }
    }
}
