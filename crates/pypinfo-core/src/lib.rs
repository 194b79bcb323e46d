//! # pypinfo-core
//!
//! Core types shared across all pypinfo crates.
//!
//! This crate provides:
//! - `Value`, the XML-RPC value model every remote response is made of
//! - Response entities (roles, release files, release data, changelog entries)
//! - `SearchSpec` and friends for the `search` procedure
//! - `PypiError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: value model, request and response types
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PypiError, PypiResult};
pub use types::{
    BrowseEntry, ChangelogEntry, FileDownloads, FromValue, PackageRole, Record, ReleaseData,
    ReleaseFile, Role, SearchField, SearchHit, SearchOperator, SearchSpec, SearchTerm, ShapeError,
    UserPackage, Value,
};
