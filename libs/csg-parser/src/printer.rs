//! # Document Printer
//!
//! Renders a structured document back to CSG text.
//!
//! Leaf primitives render as `type(props);` and instructions as
//! `type(props) { ... }` with children indented one level deeper. Structural
//! rules are checked while rendering, so a document that prints is one the
//! grammar accepts.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::{parse, print};
//!
//! let document = parse("union() { cube(); sphere(r = 2); }").unwrap();
//! let text = print(&document).unwrap();
//! assert!(text.contains("  sphere(r = 2);"));
//! ```

use crate::error::WriteError;
use crate::value::{keys, Value};
use config::constants::{
    GlobalConfig, DEFAULT_VERSION_MAJOR, DEFAULT_VERSION_MINOR, DEFAULT_VERSION_NAME,
    MIN_BINARY_OPERANDS, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES,
};
use std::fmt::Write as _;

/// Print a document with the default layout.
pub fn print(document: &Value) -> Result<String, WriteError> {
    print_with_config(document, &GlobalConfig::default())
}

/// Print a document with an explicit layout configuration.
pub fn print_with_config(document: &Value, config: &GlobalConfig) -> Result<String, WriteError> {
    let mut printer = Printer::new(config);
    printer.write_data(document, 0)?;
    Ok(printer.out)
}

// =============================================================================
// PRINTER
// =============================================================================

struct Printer<'a> {
    config: &'a GlobalConfig,
    out: String,
}

impl<'a> Printer<'a> {
    fn new(config: &'a GlobalConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    /// Write a node, or each node of an array, at `depth`.
    fn write_data(&mut self, data: &Value, depth: usize) -> Result<(), WriteError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.write_data_inner(data, depth)
        })
    }

    fn write_data_inner(&mut self, data: &Value, depth: usize) -> Result<(), WriteError> {
        match data {
            Value::Null => Err(WriteError::UnexpectedNull),
            Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.write_data(item, depth)),
            Value::Object(_) => self.write_node(data, depth),
            other => Err(WriteError::dictionary_expected(other.kind_name())),
        }
    }

    fn write_node(&mut self, node: &Value, depth: usize) -> Result<(), WriteError> {
        let node_type = match node.get(keys::TYPE) {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(WriteError::unknown_type(other.to_string())),
            None => return Err(WriteError::unknown_type("<missing>")),
        };

        match node_type {
            keys::FILE_TYPE => self.write_file(node, depth),
            "group" => {
                if children(node, node_type)?.is_empty() {
                    self.line(depth, "group();");
                    Ok(())
                } else {
                    self.write_instruction(node, node_type, depth)
                }
            }
            "multmatrix" => match node.get(keys::PROPERTIES) {
                Some(matrix @ Value::Array(_)) => {
                    let header = format!("{}({}) {{", node_type, render_value(matrix)?);
                    self.write_block(node, node_type, header, depth)
                }
                _ => self.write_instruction(node, node_type, depth),
            },
            "union" | "difference" | "intersection" | "smin" => {
                let found = children(node, node_type)?.len();
                if found < MIN_BINARY_OPERANDS {
                    return Err(WriteError::TooFewChildren {
                        node_type: node_type.to_string(),
                        expected: MIN_BINARY_OPERANDS,
                        found,
                    });
                }
                self.write_instruction(node, node_type, depth)
            }
            "cube" | "sphere" | "cylinder" | "cone" => {
                let line = format!("{}({});", node_type, render_properties(node, node_type)?);
                self.line(depth, &line);
                Ok(())
            }
            other => Err(WriteError::unknown_type(other)),
        }
    }

    /// Version header followed by the top-level nodes.
    fn write_file(&mut self, node: &Value, depth: usize) -> Result<(), WriteError> {
        let name = node
            .get(keys::VERSION_NAME)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_VERSION_NAME);
        let major = version_number(node, keys::VERSION_MAJOR, DEFAULT_VERSION_MAJOR)?;
        let minor = version_number(node, keys::VERSION_MINOR, DEFAULT_VERSION_MINOR)?;
        self.line(depth, &format!("# {} {}.{}", name, major, minor));

        match node.get(keys::CONTENTS) {
            Some(contents) => self.write_data(contents, depth),
            None => Ok(()),
        }
    }

    fn write_instruction(
        &mut self,
        node: &Value,
        node_type: &str,
        depth: usize,
    ) -> Result<(), WriteError> {
        let header = format!("{}({}) {{", node_type, render_properties(node, node_type)?);
        self.write_block(node, node_type, header, depth)
    }

    fn write_block(
        &mut self,
        node: &Value,
        node_type: &str,
        header: String,
        depth: usize,
    ) -> Result<(), WriteError> {
        self.line(depth, &header);
        for child in children(node, node_type)? {
            self.write_data(child, depth + 1)?;
        }
        self.line(depth, "}");
        Ok(())
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.out.push_str(&self.config.indent(depth));
        self.out.push_str(text);
        self.out.push('\n');
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Children of an instruction; absent or `null` means none.
fn children<'v>(node: &'v Value, node_type: &str) -> Result<&'v [Value], WriteError> {
    match node.get(keys::OBJECTS) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(WriteError::ObjectsNotArray {
            node_type: node_type.to_string(),
            found: other.kind_name().to_string(),
        }),
    }
}

/// `name = value` pairs joined by `, `; absent or `null` means none.
fn render_properties(node: &Value, node_type: &str) -> Result<String, WriteError> {
    let map = match node.get(keys::PROPERTIES) {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(WriteError::PropertiesNotMap {
                node_type: node_type.to_string(),
                found: other.kind_name().to_string(),
            })
        }
    };

    let mut out = String::new();
    for (i, (name, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} = {}", name, render_value(value)?);
    }
    Ok(out)
}

/// Render a property value in CSG literal syntax.
///
/// Numbers use the shortest decimal form that reads back to the same value;
/// it never uses exponent notation.
fn render_value(value: &Value) -> Result<String, WriteError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        render_value_inner(value)
    })
}

fn render_value_inner(value: &Value) -> Result<String, WriteError> {
    match value {
        Value::Number(n) if n.is_finite() => Ok(format!("{}", n)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) if !s.contains('"') => Ok(format!("\"{}\"", s)),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(render_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        other => Err(WriteError::unsupported_value(other.to_string())),
    }
}

fn version_number(node: &Value, key: &str, default: u32) -> Result<String, WriteError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(value @ Value::Number(_)) => render_value(value),
        Some(other) => Err(WriteError::unsupported_value(other.to_string())),
    }
}

// =============================================================================
// TESTS
// =============================================================================
