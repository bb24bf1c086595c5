//! The decoded value tree

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A decoded structured value
///
/// This is the shape a JSON/YAML decoder hands over: arbitrarily nested
/// scalars, sequences, and string-keyed mappings. Values are never mutated
/// once constructed; the schema and validation crates only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null
    Null,

    /// Boolean value
    Bool(bool),

    /// Numeric value (integers collapse to floating point)
    Number(f64),

    /// String value
    String(String),

    /// Ordered sequence of values
    Sequence(Vec<Value>),

    /// Mapping from unique string keys to values
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Borrow the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as a sequence, if it is one
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the value as a mapping, if it is one
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if the value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Short shape name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Mapping(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = Value::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
        assert!(v.as_sequence().is_none());
        assert!(v.as_mapping().is_none());

        let seq = Value::from(vec![Value::from(1), Value::from(2)]);
        assert_eq!(seq.as_sequence().map(<[Value]>::len), Some(2));

        assert!(Value::Null.is_null());
        assert!(Value::from(4.5).is_number());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(true).kind(), "bool");
        assert_eq!(Value::from(1).kind(), "number");
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::Sequence(vec![]).kind(), "sequence");
        assert_eq!(Value::Mapping(BTreeMap::new()).kind(), "mapping");
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: Value = serde_json::from_str(r#"{"a": [1, "two", null, true]}"#).unwrap();
        let expected = Value::Mapping(BTreeMap::from([(
            "a".to_string(),
            Value::Sequence(vec![
                Value::from(1),
                Value::from("two"),
                Value::Null,
                Value::from(true),
            ]),
        )]));
        assert_eq!(v, expected);
    }

    #[test]
    fn test_serialize_round_trip() {
        let v = Value::Mapping(BTreeMap::from([
            ("n".to_string(), Value::from(1.5)),
            ("s".to_string(), Value::from("x")),
        ]));
        let text = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v, back);
    }
}
