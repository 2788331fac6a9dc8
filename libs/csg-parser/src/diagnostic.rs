use crate::error::ParseError;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with severity and optional source location.
///
/// Documents built in memory have no source, so `span` is only present for
/// problems found while re-parsing serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String, span: Option<Span>) -> Self {
        Self {
            severity,
            message,
            span,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: String) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn error(message: String) -> Self {
        Self::new(Severity::Error, message, None)
    }

    pub fn warning(message: String) -> Self {
        Self::new(Severity::Warning, message, None)
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Self::new(Severity::Error, error.to_string(), Some(error.span))
    }
}
