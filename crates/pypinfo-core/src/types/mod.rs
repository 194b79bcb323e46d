//! Core data types for the package index client.
//!
//! This module provides:
//! - The XML-RPC value model and `FromValue` conversions
//! - Search request types
//! - Response entities for releases, roles and the changelog

pub mod changelog;
pub mod release;
pub mod roles;
pub mod search;
pub mod value;

// Re-export all public types
pub use changelog::ChangelogEntry;
pub use release::{FileDownloads, ReleaseData, ReleaseFile};
pub use roles::{PackageRole, Role, UserPackage};
pub use search::{BrowseEntry, SearchField, SearchHit, SearchOperator, SearchSpec, SearchTerm};
pub use value::{FromValue, Record, ShapeError, Value};
