//! Error taxonomy for the engine core.
//!
//! Every failure path is a typed variant returned to the caller; nothing is
//! logged-and-swallowed. A bad pattern never degrades to literal matching.

use thiserror::Error;

/// Errors surfaced by the engine core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed ingestion input, rejected outright and never partially stored
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Pattern text failed to compile; the whole query fails with zero results
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The named index does not exist
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// An index with this name already exists
    #[error("index already exists: {0}")]
    IndexExists(String),

    /// The mandatory default index cannot be deleted
    #[error("index is protected: {0}")]
    ProtectedIndex(String),
}

pub type Result<T> = std::result::Result<T, Error>;
