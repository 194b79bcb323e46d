//! XML-RPC value model.
//!
//! Every remote response is a tree of `Value`s. Typed response entities are
//! read out of it through `FromValue`, which checks outer shape only and
//! keeps record contents untouched.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use thiserror::Error;

/// A struct-valued response: field name to value
pub type Record = BTreeMap<String, Value>;

/// A single XML-RPC value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<int>`, `<i4>` or `<i8>`
    Int(i64),
    Bool(bool),
    /// `<string>` or untyped `<value>` text
    String(String),
    Double(f64),
    /// `<dateTime.iso8601>`, kept as the raw text the server sent
    DateTime(String),
    /// Decoded `<base64>` payload
    Base64(Vec<u8>),
    Struct(Record),
    Array(Vec<Value>),
    /// `<nil/>` extension, used by the index for missing versions
    Nil,
}

impl Value {
    /// Name of the XML-RPC type, used in shape errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Base64(_) => "base64",
            Value::Struct(_) => "struct",
            Value::Array(_) => "array",
            Value::Nil => "nil",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Record> {
        match self {
            Value::Struct(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Struct(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Serializes to the natural JSON shape; base64 payloads become base64 text.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) | Value::DateTime(s) => serializer.serialize_str(s),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Base64(bytes) => {
                serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
            },
            Value::Struct(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            },
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Value::Nil => serializer.serialize_unit(),
        }
    }
}

/// A response value did not have the outer shape its procedure documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ShapeError(pub String);

impl ShapeError {
    pub fn expected(what: &str, found: &Value) -> Self {
        Self(format!("expected {}, found {}", what, found.type_name()))
    }
}

/// Conversion from a decoded response value into a typed result
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ShapeError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ShapeError::expected("string", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(ShapeError::expected("int", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ShapeError::expected("boolean", &other)),
        }
    }
}

impl FromValue for Record {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Struct(record) => Ok(record),
            other => Err(ShapeError::expected("struct", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    T::from_value(item).map_err(|e| ShapeError(format!("item {}: {}", index, e)))
                })
                .collect(),
            other => Err(ShapeError::expected("array", &other)),
        }
    }
}

/// Unpack an array whose length must fall in `min..=max`
pub(crate) fn tuple_items(
    value: Value,
    min: usize,
    max: usize,
) -> Result<std::vec::IntoIter<Value>, ShapeError> {
    match value {
        Value::Array(items) if (min..=max).contains(&items.len()) => Ok(items.into_iter()),
        Value::Array(items) => Err(ShapeError(if min == max {
            format!("expected {}-tuple, found {} items", min, items.len())
        } else {
            format!("expected {} to {}-tuple, found {} items", min, max, items.len())
        })),
        other => Err(ShapeError::expected("array", &other)),
    }
}

/// Pull the next tuple element; callers have already checked the length
pub(crate) fn next_item<T: FromValue>(
    items: &mut std::vec::IntoIter<Value>,
    field: &str,
) -> Result<T, ShapeError> {
    let value = items
        .next()
        .ok_or_else(|| ShapeError(format!("missing {}", field)))?;
    T::from_value(value).map_err(|e| ShapeError(format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_of_strings() {
        let value = Value::from(vec!["1.0", "1.1"]);
        let versions = Vec::<String>::from_value(value).unwrap();
        assert_eq!(versions, vec!["1.0".to_string(), "1.1".to_string()]);
    }

    #[test]
    fn test_vec_reports_bad_item_index() {
        let value = Value::Array(vec![Value::from("ok"), Value::Int(3)]);
        let err = Vec::<String>::from_value(value).unwrap_err();
        assert_eq!(err.0, "item 1: expected string, found int");
    }

    #[test]
    fn test_option_maps_nil() {
        assert_eq!(Option::<String>::from_value(Value::Nil).unwrap(), None);
        assert_eq!(
            Option::<String>::from_value(Value::from("x")).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_tuple_length_checked() {
        let value = Value::from(vec!["a", "b", "c"]);
        let err = tuple_items(value, 2, 2).unwrap_err();
        assert_eq!(err.0, "expected 2-tuple, found 3 items");
    }

    #[test]
    fn test_serialize_to_json() {
        let mut record = Record::new();
        record.insert("name".to_string(), Value::from("spam"));
        record.insert("has_sig".to_string(), Value::Bool(false));
        record.insert("sig".to_string(), Value::Base64(b"hi".to_vec()));
        record.insert("extra".to_string(), Value::Nil);

        let json = serde_json::to_value(Value::Struct(record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "spam", "has_sig": false, "sig": "aGk=", "extra": null})
        );
    }
}
