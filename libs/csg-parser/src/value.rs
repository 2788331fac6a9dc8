//! # Document Value
//!
//! The structured document exchanged between CSG text and the CSG tree.
//! Every construct (file, instruction, object, matrix) is a map with a
//! `"type"` string, a `"properties"` value and, for instructions, an
//! `"objects"` array.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::Value;
//!
//! let sphere = Value::object([
//!     ("type", Value::from("sphere")),
//!     ("properties", Value::object([("r", Value::from(1.0))])),
//! ]);
//! assert_eq!(sphere.node_type(), Some("sphere"));
//! ```

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered string-keyed map of document values.
pub type Map = BTreeMap<String, Value>;

/// Well-known document keys and type names.
pub mod keys {
    /// Node type discriminator.
    pub const TYPE: &str = "type";
    /// Property map (or raw matrix) of a node.
    pub const PROPERTIES: &str = "properties";
    /// Child nodes of an instruction.
    pub const OBJECTS: &str = "objects";
    /// Version name of a file document.
    pub const VERSION_NAME: &str = "version-name";
    /// Major version of a file document.
    pub const VERSION_MAJOR: &str = "version-major";
    /// Minor version of a file document.
    pub const VERSION_MINOR: &str = "version-minor";
    /// Top-level nodes of a file document.
    pub const CONTENTS: &str = "contents";
    /// Type name of the file document.
    pub const FILE_TYPE: &str = "CSG file";
}

/// A dynamically typed document value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// Nested arrays and maps are released from a work list, so dropping a
/// deeply nested document does not recurse.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Array(items) if !items.is_empty() => std::mem::take(items),
            Value::Object(map) if !map.is_empty() => std::mem::take(map).into_values().collect(),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(map) => pending.extend(std::mem::take(map).into_values()),
                _ => {}
            }
        }
    }
}

impl Value {
    /// Builds an object value from key/value pairs.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Looks up a key in an object value.
    ///
    /// Returns `None` for missing keys and for non-object values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The `"type"` string of a node, if this is a node.
    pub fn node_type(&self) -> Option<&str> {
        self.get(keys::TYPE).and_then(Value::as_str)
    }

    /// Reads an array of numbers, failing if any item is not a number.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        self.as_array()?.iter().map(Value::as_f64).collect()
    }

    /// Short name of the value's variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Object(m)
    }
}

/// Compact JSON-like rendering, used in error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.fmt_inner(f)
        })
    }
}

impl Value {
    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// =============================================================================
// SERDE
// =============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.serialize_inner(serializer)
        })
    }
}

impl Value {
    fn serialize_inner<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    out.serialize_entry(key, item)?;
                }
                out.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a CSG document value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Number(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, item)) = access.next_entry::<String, Value>()? {
            map.insert(key, item);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_on_non_object_is_none() {
        assert!(Value::from(1.0).get("type").is_none());
        assert!(Value::Null.get("type").is_none());
    }

    #[test]
    fn test_node_type() {
        let node = Value::object([("type", Value::from("cube"))]);
        assert_eq!(node.node_type(), Some("cube"));
        assert_eq!(Value::object([("type", Value::from(3.0))]).node_type(), None);
    }

    #[test]
    fn test_as_numbers_rejects_mixed_arrays() {
        let numbers = Value::from(vec![Value::from(1.0), Value::from(2.5)]);
        assert_eq!(numbers.as_numbers(), Some(vec![1.0, 2.5]));

        let mixed = Value::from(vec![Value::from(1.0), Value::from("x")]);
        assert_eq!(mixed.as_numbers(), None);
    }

    #[test]
    fn test_display_is_compact_json() {
        let value = Value::object([
            ("size", Value::from(vec![Value::from(1.0), Value::from(0.5)])),
            ("name", Value::from("a")),
        ]);
        assert_eq!(value.to_string(), r#"{"name": "a", "size": [1, 0.5]}"#);
    }

    #[test]
    fn test_json_integers_become_numbers() {
        let value: Value = serde_json::from_str(r#"{"r": 1, "flags": [true, null]}"#).unwrap();
        assert_eq!(value.get("r"), Some(&Value::Number(1.0)));
        assert_eq!(
            value.get("flags"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn test_json_serialization_keeps_structure() {
        let value = Value::object([("type", Value::from("sphere"))]);
        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_dropping_deep_nesting() {
        let mut value = Value::from(1.0);
        for depth in 0..200_000 {
            value = if depth % 2 == 0 {
                Value::Array(vec![value, Value::Null])
            } else {
                Value::object([("objects", value)])
            };
        }
        drop(value);
    }
}
