//! Search and browse types.
//!
//! A `SearchSpec` maps index fields to the text to match. Values listed for
//! one field are OR-ed by the index; fields are combined by the
//! `SearchOperator`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::value::{next_item, tuple_items, FromValue, Record, ShapeError, Value};
use crate::error::PypiError;

/// Fields the index accepts as search keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Name,
    Version,
    Author,
    AuthorEmail,
    Maintainer,
    MaintainerEmail,
    HomePage,
    License,
    Summary,
    Description,
    Keywords,
    Platform,
    DownloadUrl,
}

impl SearchField {
    pub const ALL: [SearchField; 13] = [
        SearchField::Name,
        SearchField::Version,
        SearchField::Author,
        SearchField::AuthorEmail,
        SearchField::Maintainer,
        SearchField::MaintainerEmail,
        SearchField::HomePage,
        SearchField::License,
        SearchField::Summary,
        SearchField::Description,
        SearchField::Keywords,
        SearchField::Platform,
        SearchField::DownloadUrl,
    ];

    /// Key as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Version => "version",
            SearchField::Author => "author",
            SearchField::AuthorEmail => "author_email",
            SearchField::Maintainer => "maintainer",
            SearchField::MaintainerEmail => "maintainer_email",
            SearchField::HomePage => "home_page",
            SearchField::License => "license",
            SearchField::Summary => "summary",
            SearchField::Description => "description",
            SearchField::Keywords => "keywords",
            SearchField::Platform => "platform",
            SearchField::DownloadUrl => "download_url",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = PypiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| PypiError::InvalidArgument {
                argument: s.to_string(),
                reason: format!(
                    "not a search field (expected one of: {})",
                    SearchField::ALL.map(|f| f.as_str()).join(", ")
                ),
            })
    }
}

/// Text to match for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchTerm {
    One(String),
    /// Any of these values may match
    Any(Vec<String>),
}

impl SearchTerm {
    fn to_value(&self) -> Value {
        match self {
            SearchTerm::One(text) => Value::from(text.as_str()),
            SearchTerm::Any(texts) => Value::from(texts.clone()),
        }
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        SearchTerm::One(value.to_string())
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        SearchTerm::One(value)
    }
}

impl From<Vec<String>> for SearchTerm {
    fn from(values: Vec<String>) -> Self {
        SearchTerm::Any(values)
    }
}

/// Search spec passed as the first argument of `search`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchSpec {
    terms: BTreeMap<SearchField, SearchTerm>,
}

impl SearchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`
    pub fn with(mut self, field: SearchField, term: impl Into<SearchTerm>) -> Self {
        self.insert(field, term);
        self
    }

    /// Set the term for a field, replacing any previous one
    pub fn insert(&mut self, field: SearchField, term: impl Into<SearchTerm>) {
        self.terms.insert(field, term.into());
    }

    /// Add one more accepted value for a field
    pub fn push(&mut self, field: SearchField, text: impl Into<String>) {
        let text = text.into();
        match self.terms.remove(&field) {
            None => {
                self.terms.insert(field, SearchTerm::One(text));
            },
            Some(SearchTerm::One(first)) => {
                self.terms.insert(field, SearchTerm::Any(vec![first, text]));
            },
            Some(SearchTerm::Any(mut texts)) => {
                texts.push(text);
                self.terms.insert(field, SearchTerm::Any(texts));
            },
        }
    }

    pub fn get(&self, field: SearchField) -> Option<&SearchTerm> {
        self.terms.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SearchField, &SearchTerm)> {
        self.terms.iter()
    }

    /// Wire form: a struct keyed by field name
    pub fn to_value(&self) -> Value {
        let record: Record = self
            .terms
            .iter()
            .map(|(field, term)| (field.as_str().to_string(), term.to_value()))
            .collect();
        Value::Struct(record)
    }
}

/// How terms for different fields are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOperator {
    #[default]
    And,
    Or,
}

impl SearchOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOperator::And => "and",
            SearchOperator::Or => "or",
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchOperator {
    type Err = PypiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(SearchOperator::And),
            "or" => Ok(SearchOperator::Or),
            other => Err(PypiError::InvalidArgument {
                argument: other.to_string(),
                reason: "search operator must be 'and' or 'or'".to_string(),
            }),
        }
    }
}

/// One `search` match; all fields the index sent are kept
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchHit(Record);

impl SearchHit {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }
}

impl FromValue for SearchHit {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        Record::from_value(value).map(SearchHit)
    }
}

/// A `(name, version)` pair from `browse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseEntry {
    pub name: String,
    pub version: String,
}

impl FromValue for BrowseEntry {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let mut items = tuple_items(value, 2, 2)?;
        Ok(Self {
            name: next_item(&mut items, "name")?,
            version: next_item(&mut items, "version")?,
        })
    }
}
