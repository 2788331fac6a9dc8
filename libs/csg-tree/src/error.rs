//! # Load Errors
//!
//! Error types for building a CSG tree from a structured document.

use thiserror::Error;

/// Errors that abort loading a document into a tree.
///
/// No partial tree is returned when loading fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// A `null` appeared where a node was expected.
    #[error("Unexpected NULL object")]
    UnexpectedNull,

    /// A scalar appeared where a node object was expected.
    #[error("Dictionary expected: {0}")]
    DictionaryExpected(String),

    /// Node type is missing or not loadable.
    #[error("Unknown object type: {0}")]
    UnknownType(String),

    /// A fold received no operands.
    #[error("'{0}' needs at least one operand to combine")]
    EmptyOperands(String),

    /// Matrix is not 4 rows of 4 numbers.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// `multmatrix` carries no matrix to apply.
    #[error("multmatrix without a matrix")]
    UnresolvedMatrix,

    /// A property has the wrong shape for its node.
    #[error("Invalid property '{name}' of '{node_type}': {value}")]
    InvalidProperty {
        node_type: String,
        name: String,
        value: String,
    },
}

impl LoadError {
    pub fn dictionary_expected(found: impl Into<String>) -> Self {
        Self::DictionaryExpected(found.into())
    }

    pub fn unknown_type(node_type: impl Into<String>) -> Self {
        Self::UnknownType(node_type.into())
    }

    pub fn empty_operands(node_type: impl Into<String>) -> Self {
        Self::EmptyOperands(node_type.into())
    }

    pub fn invalid_matrix(matrix: impl Into<String>) -> Self {
        Self::InvalidMatrix(matrix.into())
    }

    pub fn invalid_property(
        node_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidProperty {
            node_type: node_type.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LoadError::unknown_type("\"torus\"").to_string(),
            "Unknown object type: \"torus\""
        );
        let err = LoadError::invalid_property("cube", "size", "\"big\"");
        assert!(err.to_string().contains("'size' of 'cube'"));
    }
}
