//! # Round-Trip Validation
//!
//! Serializes a document and re-parses the text. Problems are reported as
//! diagnostics and logged; validation itself never fails.

use crate::diagnostic::Diagnostic;
use crate::printer::print;
use crate::value::Value;

/// Check that a document survives serialization and re-parsing.
///
/// An empty result means the document round-trips.
///
/// ## Example
///
/// ```rust
/// use csg_parser::{parse, validate, Value};
///
/// let document = parse("sphere(r = 1);").unwrap();
/// assert!(validate(&document).is_empty());
/// assert_eq!(validate(&Value::Null).len(), 1);
/// ```
pub fn validate(document: &Value) -> Vec<Diagnostic> {
    let text = match print(document) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "serialization error");
            return vec![Diagnostic::error(format!("Serialization error: {}", e))];
        }
    };

    match crate::parse(&text) {
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "validation error");
            let diagnostic = Diagnostic::from(&e).with_hint(e.excerpt(&text));
            vec![diagnostic]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::value::keys;

    #[test]
    fn test_valid_document_has_no_diagnostics() {
        let document = crate::parse("difference() { cube(); sphere(r = 0.5); }").unwrap();
        assert!(validate(&document).is_empty());
    }

    #[test]
    fn test_serialization_failure_is_reported() {
        let diagnostics = validate(&Value::object([(keys::TYPE, Value::from("torus"))]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("torus"));
        assert!(diagnostics[0].span.is_none());
    }

    #[test]
    fn test_reparse_failure_is_reported() {
        let bad_name = Value::object([
            (keys::TYPE, Value::from("sphere")),
            (keys::PROPERTIES, Value::object([("r2", Value::from(1.0))])),
        ]);
        let diagnostics = validate(&bad_name);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].span.is_some());
        assert!(diagnostics[0].hint.is_some());
    }

    #[test]
    fn test_never_panics_on_arbitrary_values() {
        for value in [
            Value::Null,
            Value::from(true),
            Value::from(vec![Value::Null]),
            Value::object([(keys::TYPE, Value::from(1.0))]),
        ] {
            assert!(!validate(&value).is_empty());
        }
    }
}
