//! Python package index XML-RPC client
//!
//! This crate provides one async method per remote procedure of the index's
//! metadata interface. Each method sends a single call and hands back what
//! the index answered, without caching, retrying or filtering.

pub mod client;
pub mod transport;
pub mod xmlrpc;

// Re-export main types
pub use client::{ClientConfig, PypiClient, DEFAULT_INDEX_URL};
pub use transport::{HttpTransport, Transport};

use pypinfo_core::error::PypiError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, PypiError>;
