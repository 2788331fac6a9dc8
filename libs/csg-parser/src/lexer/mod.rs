//! # CSG Lexer
//!
//! Tokenizes CSG source text. Spaces, tabs, newlines and carriage returns
//! separate tokens; `#` starts a comment running to the end of the line.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("sphere(r = 1);").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Name);
//! assert_eq!(tokens[4].text, "1");
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

/// Characters treated as token separators.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

// =============================================================================
// LEXER
// =============================================================================

/// CSG lexer.
///
/// Converts source text into a stream of tokens ending with `Eof`.
/// Invalid input never aborts lexing; it becomes `Error` or
/// `UnterminatedString` tokens that the parser reports.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.cursor.advance_while(is_separator);
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::point(eof), String::new()));
        self.tokens
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return,
        };

        match c {
            '#' => return self.scan_comment(start),
            '"' => return self.scan_string(start),
            '-' | '0'..='9' => return self.scan_number(start),
            '$' | 'a'..='z' | 'A'..='Z' => return self.scan_name(start),
            _ => {}
        }

        self.cursor.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Eq,
            _ => TokenKind::Error,
        };
        self.push(kind, start);
    }

    fn push(&mut self, kind: TokenKind, start: Position) {
        let text = self.cursor.slice_from(start).to_string();
        self.push_text(kind, start, text);
    }

    fn push_text(&mut self, kind: TokenKind, start: Position, text: String) {
        let span = Span::new(start, self.cursor.position());
        self.tokens.push(Token::new(kind, span, text));
    }

    /// Scan a `#` comment up to (not including) the line break.
    fn scan_comment(&mut self, start: Position) {
        self.cursor.advance();
        let body_start = self.cursor.position();
        self.cursor.advance_while(|c| c != '\n');
        let body = self.cursor.slice_from(body_start).trim_end_matches('\r').to_string();
        self.push_text(TokenKind::Comment, start, body);
    }

    /// Scan a string literal. There are no escape sequences.
    fn scan_string(&mut self, start: Position) {
        self.cursor.advance();
        let content_start = self.cursor.position();
        self.cursor.advance_while(|c| c != '"');
        let content = self.cursor.slice_from(content_start).to_string();

        if self.cursor.eat('"') {
            self.push_text(TokenKind::String, start, content);
        } else {
            self.push_text(TokenKind::UnterminatedString, start, content);
        }
    }

    /// Scan `'-'? [0-9]+ ('.' [0-9]+)? ('e' '-'? [0-9]+)?`.
    ///
    /// Optional parts are only consumed when complete, so `1.` lexes as `1`
    /// followed by an invalid `.`, and `1e+5` as `1` followed by the name `e`.
    fn scan_number(&mut self, start: Position) {
        if self.cursor.eat('-') && !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return self.push(TokenKind::Error, start);
        }
        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        if self.cursor.peek() == Some('e') {
            let exponent_digits = match self.cursor.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('-') => self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_digits {
                self.cursor.advance();
                self.cursor.eat('-');
                self.cursor.advance_while(|c| c.is_ascii_digit());
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan `'$'? [a-zA-Z]+`, recognizing the boolean keywords.
    fn scan_name(&mut self, start: Position) {
        if self.cursor.eat('$') && !self.cursor.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            return self.push(TokenKind::Error, start);
        }
        self.cursor.advance_while(|c| c.is_ascii_alphabetic());

        let kind = match self.cursor.slice_from(start) {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Name,
        };
        self.push(kind, start);
    }
}

// =============================================================================
// TESTS
// =============================================================================
