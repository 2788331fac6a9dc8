//! # Tree Loader
//!
//! Builds a binary CSG tree from a structured document.
//!
//! Transforms accumulate on the way down: each `multmatrix` right-multiplies
//! its matrix into the running transform, and each primitive stores the
//! product with its own local scale. N-ary operand lists are folded to the
//! right, `[a, b, c]` becoming `op(a, op(b, c))`; a single operand is
//! returned unwrapped.
//!
//! A file with several top-level items, or a bare array of nodes, loads as
//! the union of all of them, not just the first.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::parse;
//! use csg_tree::{load_tree, CsgOp};
//!
//! let document = parse("difference() { cube(size = [1, 1, 1]); sphere(r = 0.5); }").unwrap();
//! let tree = load_tree(&document).unwrap();
//! assert_eq!(tree.op(), Some(CsgOp::Difference));
//! assert_eq!(tree.primitive_count(), 2);
//! ```

use crate::error::LoadError;
use crate::node::{with_stack, CsgNode, CsgOp, Material, PrimitiveKind};
use crate::transform::{from_rows, scaling, uniform_scaling};
use config::constants::DEFAULT_SPHERE_RADIUS;
use csg_parser::{keys, Map, Value};
use glam::{DMat4, DVec3, Vec4};

/// Property holding the matrix of a map-form `multmatrix`.
const MATRIX_PROPERTY: &str = "m";

/// Loads a document into a new tree, starting from the identity transform.
///
/// Fails without a partial tree on the first structural problem.
pub fn load_tree(document: &Value) -> Result<CsgNode, LoadError> {
    let tree = load_node(document, &DMat4::IDENTITY)?;
    tracing::debug!(
        primitives = tree.primitive_count(),
        operations = tree.operation_count(),
        "loaded CSG tree"
    );
    Ok(tree)
}

fn load_node(data: &Value, transform: &DMat4) -> Result<CsgNode, LoadError> {
    with_stack(|| load_node_inner(data, transform))
}

fn load_node_inner(data: &Value, transform: &DMat4) -> Result<CsgNode, LoadError> {
    let node_type = match data {
        Value::Null => return Err(LoadError::UnexpectedNull),
        Value::Array(items) => return collect_nodes(CsgOp::Union, items, transform, "array"),
        Value::Object(_) => match data.get(keys::TYPE) {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(LoadError::unknown_type(other.to_string())),
            None => return Err(LoadError::unknown_type("<missing>")),
        },
        other => return Err(LoadError::dictionary_expected(other.to_string())),
    };
    tracing::trace!(node_type, "loading node");

    match node_type {
        // Every top-level item is kept.
        keys::FILE_TYPE => {
            let contents = operands(data, keys::CONTENTS, node_type)?;
            collect_nodes(CsgOp::Union, contents, transform, node_type)
        }
        "group" | "union" => {
            let objects = operands(data, keys::OBJECTS, node_type)?;
            collect_nodes(CsgOp::Union, objects, transform, node_type)
        }
        "multmatrix" => {
            let matrix = multmatrix(data)?;
            let objects = operands(data, keys::OBJECTS, node_type)?;
            collect_nodes(CsgOp::Union, objects, &(*transform * matrix), node_type)
        }
        "difference" => binary(CsgOp::Difference, CsgOp::Union, data, transform, node_type),
        "intersection" => {
            binary(CsgOp::Intersection, CsgOp::Intersection, data, transform, node_type)
        }
        "cube" => {
            let properties = properties(data, node_type)?;
            let local = match properties.and_then(|p| p.get("size")) {
                None | Some(Value::Null) => DMat4::IDENTITY,
                Some(Value::Number(s)) => uniform_scaling(*s),
                Some(size) => match size.as_numbers().as_deref() {
                    Some(&[x, y, z]) => scaling(DVec3::new(x, y, z)),
                    _ => {
                        return Err(LoadError::invalid_property(
                            node_type,
                            "size",
                            size.to_string(),
                        ))
                    }
                },
            };
            primitive(PrimitiveKind::Box, *transform * local, properties, node_type)
        }
        "sphere" => {
            let properties = properties(data, node_type)?;
            let radius = match properties.and_then(|p| p.get("r")) {
                None | Some(Value::Null) => DEFAULT_SPHERE_RADIUS,
                Some(Value::Number(r)) if *r > 0.0 => *r,
                Some(Value::Number(_)) => DEFAULT_SPHERE_RADIUS,
                Some(other) => {
                    return Err(LoadError::invalid_property(node_type, "r", other.to_string()))
                }
            };
            primitive(
                PrimitiveKind::Sphere,
                *transform * uniform_scaling(radius),
                properties,
                node_type,
            )
        }
        _ => Err(LoadError::unknown_type(format!("{:?}", node_type))),
    }
}

/// `op(first, fold(rest, fold_op))`, as used by difference and intersection.
fn binary(
    op: CsgOp,
    fold_op: CsgOp,
    data: &Value,
    transform: &DMat4,
    node_type: &str,
) -> Result<CsgNode, LoadError> {
    match operands(data, keys::OBJECTS, node_type)? {
        [] | [_] => Err(LoadError::empty_operands(node_type)),
        [first, rest @ ..] => {
            let left = load_node(first, transform)?;
            let right = collect_nodes(fold_op, rest, transform, node_type)?;
            Ok(CsgNode::operation(op, left, right))
        }
    }
}

/// Right fold of `items` with `op`.
fn collect_nodes(
    op: CsgOp,
    items: &[Value],
    transform: &DMat4,
    node_type: &str,
) -> Result<CsgNode, LoadError> {
    match items {
        [] => Err(LoadError::empty_operands(node_type)),
        [single] => load_node(single, transform),
        [first, rest @ ..] => with_stack(|| {
            let left = load_node(first, transform)?;
            let right = collect_nodes(op, rest, transform, node_type)?;
            Ok(CsgNode::operation(op, left, right))
        }),
    }
}

/// Child list under `key`; absent or `null` means empty.
fn operands<'v>(data: &'v Value, key: &str, node_type: &str) -> Result<&'v [Value], LoadError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(LoadError::invalid_property(node_type, key, other.to_string())),
    }
}

/// Property map of a node; absent or `null` means none.
fn properties<'v>(data: &'v Value, node_type: &str) -> Result<Option<&'v Map>, LoadError> {
    match data.get(keys::PROPERTIES) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(LoadError::invalid_property(
            node_type,
            keys::PROPERTIES,
            other.to_string(),
        )),
    }
}

/// Matrix of a `multmatrix` node, from raw array properties or the `m`
/// property.
fn multmatrix(data: &Value) -> Result<DMat4, LoadError> {
    match data.get(keys::PROPERTIES) {
        Some(rows @ Value::Array(_)) => matrix_from_rows(rows),
        Some(Value::Object(map)) => match map.get(MATRIX_PROPERTY) {
            Some(rows) => matrix_from_rows(rows),
            None => Err(LoadError::UnresolvedMatrix),
        },
        None | Some(Value::Null) => Err(LoadError::UnresolvedMatrix),
        Some(other) => Err(LoadError::invalid_matrix(other.to_string())),
    }
}

fn matrix_from_rows(value: &Value) -> Result<DMat4, LoadError> {
    let invalid = || LoadError::invalid_matrix(value.to_string());
    let rows = value.as_array().ok_or_else(invalid)?;
    if rows.len() != 4 {
        return Err(invalid());
    }

    let mut matrix = [[0.0; 4]; 4];
    for (target, row) in matrix.iter_mut().zip(rows) {
        match row.as_numbers().as_deref() {
            Some(&[a, b, c, d]) => *target = [a, b, c, d],
            _ => return Err(invalid()),
        }
    }
    Ok(from_rows(matrix))
}

/// Primitive with its material read from the optional `color` property.
fn primitive(
    shape: PrimitiveKind,
    transform: DMat4,
    properties: Option<&Map>,
    node_type: &str,
) -> Result<CsgNode, LoadError> {
    let material = match properties.and_then(|p| p.get("color")) {
        None | Some(Value::Null) => Material::default(),
        Some(color) => Material::new(read_color(color).ok_or_else(|| {
            LoadError::invalid_property(node_type, "color", color.to_string())
        })?),
    };
    Ok(CsgNode::primitive(shape, transform, material))
}

/// RGB or RGBA components in `[0, 1]`; alpha defaults to opaque.
fn read_color(value: &Value) -> Option<Vec4> {
    let components = value.as_numbers()?;
    if !components.iter().all(|c| (0.0..=1.0).contains(c)) {
        return None;
    }
    match components[..] {
        [r, g, b] => Some(Vec4::new(r as f32, g as f32, b as f32, 1.0)),
        [r, g, b, a] => Some(Vec4::new(r as f32, g as f32, b as f32, a as f32)),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
