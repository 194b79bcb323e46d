//! Changelog event type.

use serde::Serialize;

use super::value::{next_item, tuple_items, FromValue, ShapeError, Value};

/// One changelog event.
///
/// `changelog` sends 4-tuples unless ids were requested;
/// `changelog_since_serial` always sends 5-tuples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    pub name: String,
    /// Nil for package-level actions such as `create`
    pub version: Option<String>,
    /// UTC seconds since the epoch
    pub timestamp: i64,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<i64>,
}

impl FromValue for ChangelogEntry {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let mut items = tuple_items(value, 4, 5)?;
        Ok(Self {
            name: next_item(&mut items, "name")?,
            version: next_item(&mut items, "version")?,
            timestamp: next_item(&mut items, "timestamp")?,
            action: next_item(&mut items, "action")?,
            serial: match items.next() {
                Some(serial) => Some(
                    i64::from_value(serial).map_err(|e| ShapeError(format!("serial: {}", e)))?,
                ),
                None => None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_tuple_has_no_serial() {
        let value = Value::Array(vec![
            Value::from("PyRedstone"),
            Value::from("0.1"),
            Value::Int(1480523283),
            Value::from("new release"),
        ]);
        let entry = ChangelogEntry::from_value(value).unwrap();
        assert_eq!(entry.name, "PyRedstone");
        assert_eq!(entry.version.as_deref(), Some("0.1"));
        assert_eq!(entry.timestamp, 1480523283);
        assert_eq!(entry.serial, None);
    }

    #[test]
    fn test_five_tuple_with_nil_version() {
        let value = Value::Array(vec![
            Value::from("spam"),
            Value::Nil,
            Value::Int(1480523290),
            Value::from("create"),
            Value::Int(2500000),
        ]);
        let entry = ChangelogEntry::from_value(value).unwrap();
        assert_eq!(entry.version, None);
        assert_eq!(entry.action, "create");
        assert_eq!(entry.serial, Some(2500000));
    }

    #[test]
    fn test_three_tuple_rejected() {
        let value = Value::from(vec!["a", "b", "c"]);
        assert!(ChangelogEntry::from_value(value).is_err());
    }

    #[test]
    fn test_string_timestamp_rejected() {
        let value = Value::from(vec!["a", "1.0", "1480523283", "new release"]);
        let err = ChangelogEntry::from_value(value).unwrap_err();
        assert_eq!(err.0, "timestamp: expected int, found string");
    }
}
