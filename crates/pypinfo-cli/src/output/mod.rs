//! Terminal output formatting.
//!
//! Human-readable lines for interactive use, or one JSON document per
//! result with `--json`.

pub mod colors;
pub mod errors;

use serde::Serialize;

use pypinfo_core::error::{PypiError, PypiResult};
use pypinfo_core::types::{Record, Value};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    json: bool,
}

impl OutputHandler {
    /// Create a new output handler; JSON mode never colors
    pub fn new(json: bool) -> Self {
        let colors = if json {
            colors::ColorSupport::disabled()
        } else {
            colors::ColorSupport::detect()
        };
        Self { colors, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a status message on stderr
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a warning message on stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a section heading
    pub fn heading(&self, title: &str) {
        println!();
        println!("{}", self.colors.bold(title));
        println!("{}", self.colors.dim(&"=".repeat(title.chars().count())));
    }

    /// Print one line of result data
    pub fn data(&self, line: &str) {
        println!("{}", line);
    }

    /// Print a `key: value` pair with the key highlighted
    pub fn field(&self, key: &str, value: &str) {
        println!("{}: {}", self.colors.green(key), value);
    }

    /// Print every field of a record
    pub fn record(&self, record: &Record) {
        for (key, value) in record {
            self.field(key, &render_value(value));
        }
    }

    /// Print any serializable result as pretty JSON
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> PypiResult<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| PypiError::io("Failed to render JSON output".to_string(), e.into()))?;
        println!("{}", text);
        Ok(())
    }
}

/// Render a value the way it reads in a terminal
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) | Value::DateTime(s) => s.clone(),
        Value::Double(d) => d.to_string(),
        Value::Base64(bytes) => format!("<{} bytes>", bytes.len()),
        Value::Struct(record) => {
            let fields: Vec<String> = record
                .iter()
                .map(|(key, value)| format!("{}: {}", key, render_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        },
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        },
        Value::Nil => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_value(&Value::Int(42)), "42");
        assert_eq!(render_value(&Value::Bool(false)), "false");
        assert_eq!(render_value(&Value::Nil), "-");
        assert_eq!(render_value(&Value::Base64(vec![0; 3])), "<3 bytes>");
    }

    #[test]
    fn test_render_nested() {
        let mut record = Record::new();
        record.insert("tags".to_string(), Value::from(vec!["a", "b"]));
        record.insert("size".to_string(), Value::Int(1));
        assert_eq!(render_value(&Value::Struct(record)), "{size: 1, tags: [a, b]}");
    }
}
