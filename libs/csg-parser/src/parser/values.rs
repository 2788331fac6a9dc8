//! # Value Parsing
//!
//! Property lists, matrices and literal values.

use super::Parser;
use crate::error::{ParseError, ParseErrorKind, Rule};
use crate::lexer::TokenKind;
use crate::value::{Map, Value};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

impl Parser {
    /// Parse `(Property (',' Property)*)?`.
    ///
    /// A repeated property name keeps the last value.
    pub(super) fn parse_property_list(&mut self) -> Result<Map, ParseError> {
        let mut properties = Map::new();
        if !self.check(TokenKind::Name) {
            return Ok(properties);
        }

        loop {
            let (name, value) = self.parse_property()?;
            properties.insert(name, value);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(properties)
    }

    /// Parse `Name '=' Value`.
    fn parse_property(&mut self) -> Result<(String, Value), ParseError> {
        let name = self.expect(TokenKind::Name, Rule::Property)?;
        self.expect(TokenKind::Eq, Rule::Property)?;
        let value = self.parse_value()?;
        Ok((name.text, value))
    }

    /// Parse the raw matrix argument of an instruction.
    pub(super) fn parse_matrix(&mut self) -> Result<Value, ParseError> {
        self.parse_array(Rule::Matrix)
    }

    /// Parse `Number | String | Boolean | Array`.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => self.parse_number(),
            TokenKind::String => Ok(Value::String(self.advance().text)),
            TokenKind::True => {
                self.advance();
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Bool(false))
            }
            TokenKind::LBracket => self.parse_array(Rule::Array),
            _ => Err(self.unexpected("value", Rule::Value)),
        }
    }

    /// Parse `'[' (Value (',' Value)*)? ']'`.
    fn parse_array(&mut self, rule: Rule) -> Result<Value, ParseError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.expect(TokenKind::LBracket, rule)?;
            let mut items = Vec::new();

            if !self.match_token(TokenKind::RBracket) {
                loop {
                    items.push(self.parse_value()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBracket, rule)?;
            }

            Ok(Value::Array(items))
        })
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let token = self.expect(TokenKind::Number, Rule::Number)?;
        token.text.parse::<f64>().map(Value::Number).map_err(|_| {
            ParseError::new(
                ParseErrorKind::InvalidNumber {
                    text: token.text.clone(),
                },
                token.span,
                Rule::Number,
            )
        })
    }
}
