//! value representation
//!
//! The output model contains the following data types
//! - integer (non-negative in source, stored as i64)
//! - text (utf-8, taken verbatim from between the quotes)
//! - mapping (order-preserving "map"/"dictionary", where the key is an identifier)
//!
//! Additionally a value may be an unresolved reference to a constant. References only exist between
//! parsing and the final resolution pass and never appear in a successfully parsed document.
//!
//! There is no `null`, boolean, decimal or list.
use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serializer};

pub type Mapping = IndexMap<String, Value>;

/// Deepest mapping nesting a document may have
///
/// Values are walked recursively, so the bound keeps parsing, resolution and serialization off the
/// end of the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// All possible value types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Mapping(Mapping),
    Reference(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Number of nested mapping levels, `0` for terminal values
    pub fn depth(&self) -> usize {
        match self {
            Value::Mapping(mapping) => 1 + mapping.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<K: ToString, V: Into<Value>> From<Vec<(K, V)>> for Value {
    fn from(value: Vec<(K, V)>) -> Self {
        Value::Mapping(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Mapping(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
            Value::Reference(name) => serializer.collect_str(&format_args!("#{{{name}}}")),
        }
    }
}
