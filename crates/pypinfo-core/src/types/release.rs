//! Release-scoped response types.
//!
//! `release_urls` and `release_data` return structs whose field set the
//! index controls. They are wrapped rather than mapped onto fixed structs so
//! every field the server sends reaches the caller.

use serde::Serialize;

use super::value::{next_item, tuple_items, FromValue, Record, ShapeError, Value};

macro_rules! str_fields {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> Option<&str> {
                self.str_field(stringify!($name))
            }
        )*
    };
}

macro_rules! list_fields {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> Vec<&str> {
                self.list_field(stringify!($name))
            }
        )*
    };
}

fn str_in<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn list_in<'a>(record: &'a Record, key: &str) -> Vec<&'a str> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// One distributed artifact of a release, from `release_urls`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReleaseFile(Record);

impl ReleaseFile {
    fn str_field(&self, key: &str) -> Option<&str> {
        str_in(&self.0, key)
    }

    str_fields! {
        url,
        /// `sdist`, `bdist_wheel`, ...
        packagetype,
        filename,
        md5_digest,
        /// Required interpreter version, or `source` / `any`
        python_version,
        comment_text,
    }

    /// Size in bytes
    pub fn size(&self) -> Option<i64> {
        self.0.get("size").and_then(Value::as_i64)
    }

    pub fn downloads(&self) -> Option<i64> {
        self.0.get("downloads").and_then(Value::as_i64)
    }

    pub fn has_sig(&self) -> Option<bool> {
        self.0.get("has_sig").and_then(Value::as_bool)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }
}

impl FromValue for ReleaseFile {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        Record::from_value(value).map(ReleaseFile)
    }
}

/// Release metadata from `release_data`.
///
/// Empty when the release does not exist; the index answers with `{}`
/// instead of a fault.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReleaseData(Record);

impl ReleaseData {
    fn str_field(&self, key: &str) -> Option<&str> {
        str_in(&self.0, key)
    }

    fn list_field(&self, key: &str) -> Vec<&str> {
        list_in(&self.0, key)
    }

    str_fields! {
        name,
        version,
        stable_version,
        author,
        author_email,
        maintainer,
        maintainer_email,
        home_page,
        license,
        summary,
        description,
        keywords,
        platform,
        download_url,
        requires_python,
        /// Hosted documentation URL, when one was uploaded
        docs_url,
    }

    list_fields! {
        /// Trove classifier strings
        classifiers,
        requires,
        requires_dist,
        provides,
        provides_dist,
        requires_external,
        obsoletes,
        obsoletes_dist,
        /// `"Label, url"` entries
        project_url,
    }

    /// True when the release was not found
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }
}

impl FromValue for ReleaseData {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        Record::from_value(value).map(ReleaseData)
    }
}

/// A `(filename, download count)` pair from `release_downloads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDownloads {
    pub filename: String,
    pub downloads: i64,
}

impl FromValue for FileDownloads {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let mut items = tuple_items(value, 2, 2)?;
        Ok(Self {
            filename: next_item(&mut items, "filename")?,
            downloads: next_item(&mut items, "downloads")?,
        })
    }
}
