//! # Statement Parsing
//!
//! Object lists, objects, instructions and comments.

use super::{Parser, Version};
use crate::error::{ParseError, Rule};
use crate::lexer::TokenKind;
use crate::value::{keys, Value};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

/// What an object list item may start with.
const ITEM_EXPECTED: &str = "comment, object or instruction";

impl Parser {
    /// Parse one object list item.
    ///
    /// Comments yield `None`; a version directive comment updates the file
    /// version as a side effect.
    pub(super) fn parse_item(&mut self) -> Result<Option<Value>, ParseError> {
        match self.peek_kind() {
            TokenKind::Comment => {
                self.parse_comment();
                Ok(None)
            }
            TokenKind::Name => self.parse_statement().map(Some),
            _ => Err(self.unexpected(ITEM_EXPECTED, Rule::ObjectList)),
        }
    }

    /// Parse a comment, recording it when it is a version directive.
    fn parse_comment(&mut self) {
        let token = self.advance();
        if let Some(version) = Version::from_comment(&token.text) {
            tracing::trace!(name = %version.name, major = version.major, minor = version.minor, "version directive");
            self.version = Some(version);
        }
    }

    /// Parse `Object / Instruction` as an ordered choice.
    ///
    /// When both alternatives fail, the error that reached further into the
    /// input is returned; on a tie the object error wins.
    fn parse_statement(&mut self) -> Result<Value, ParseError> {
        let start = self.checkpoint();

        let object_error = match self.parse_object() {
            Ok(object) => return Ok(object),
            Err(e) => e,
        };

        self.restore(start);
        self.parse_instruction().map_err(|instruction_error| {
            if instruction_error.offset() > object_error.offset() {
                instruction_error
            } else {
                object_error
            }
        })
    }

    /// Parse `Name '(' PropertyList ')' ';'`.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let name = self.expect(TokenKind::Name, Rule::Object)?;
        self.expect(TokenKind::LParen, Rule::Object)?;
        let properties = self.parse_property_list()?;
        self.expect(TokenKind::RParen, Rule::Object)?;
        self.expect(TokenKind::Semicolon, Rule::Object)?;

        Ok(Value::object([
            (keys::TYPE, Value::from(name.text)),
            (keys::PROPERTIES, Value::Object(properties)),
        ]))
    }

    /// Parse `Name '(' (Matrix | PropertyList) ')' '{' ObjectList '}'`.
    fn parse_instruction(&mut self) -> Result<Value, ParseError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.parse_instruction_inner()
        })
    }

    fn parse_instruction_inner(&mut self) -> Result<Value, ParseError> {
        let name = self.expect(TokenKind::Name, Rule::Instruction)?;
        self.expect(TokenKind::LParen, Rule::Instruction)?;

        let properties = if self.check(TokenKind::LBracket) {
            self.parse_matrix()?
        } else {
            Value::Object(self.parse_property_list()?)
        };

        self.expect(TokenKind::RParen, Rule::Instruction)?;
        self.expect(TokenKind::LBrace, Rule::Instruction)?;
        let objects = self.parse_object_list()?;
        self.expect(TokenKind::RBrace, Rule::Instruction)?;

        Ok(Value::object([
            (keys::TYPE, Value::from(name.text)),
            (keys::PROPERTIES, properties),
            (keys::OBJECTS, Value::Array(objects)),
        ]))
    }

    /// Parse `(Comment | Object | Instruction)+` up to a closing `}`.
    fn parse_object_list(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut objects = Vec::new();
        let mut items = 0usize;

        loop {
            if items > 0 && self.check(TokenKind::RBrace) {
                break;
            }
            if let Some(node) = self.parse_item()? {
                objects.push(node);
            }
            items += 1;
        }

        Ok(objects)
    }
}
