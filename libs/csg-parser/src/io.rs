//! # File Conversion
//!
//! Reading and writing `.csg` text and `.csgjs` structured documents.

use crate::error::CsgError;
use crate::printer::print;
use crate::validate::validate;
use crate::value::Value;
use std::fs;
use std::path::Path;

/// Read and parse a CSG text file.
///
/// A syntax error is logged with an excerpt of the offending line and
/// returned.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value, CsgError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| CsgError::io(path, e))?;

    crate::parse(&source).map_err(|e| {
        tracing::warn!(path = %path.display(), "{}\n{}", e, e.excerpt(&source));
        CsgError::from(e)
    })
}

/// Parse a structured document from JSON text.
pub fn parse_json(text: &str) -> Result<Value, CsgError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a `.csgjs` file.
///
/// The document is validated before it is returned; validation problems are
/// logged but do not fail the read.
pub fn parse_json_file(path: impl AsRef<Path>) -> Result<Value, CsgError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| CsgError::io(path, e))?;
    let document = parse_json(&text)?;
    validate(&document);
    Ok(document)
}

/// Serialize a document to a CSG text file.
///
/// Nothing is written if serialization fails.
pub fn write_file(document: &Value, path: impl AsRef<Path>) -> Result<(), CsgError> {
    let path = path.as_ref();
    let text = print(document)?;
    fs::write(path, text).map_err(|e| CsgError::io(path, e))
}

/// Write a document as compact JSON, validating it first (advisory).
pub fn write_json_file(document: &Value, path: impl AsRef<Path>) -> Result<(), CsgError> {
    let path = path.as_ref();
    validate(document);
    let text = serde_json::to_string(document)?;
    fs::write(path, text).map_err(|e| CsgError::io(path, e))
}
