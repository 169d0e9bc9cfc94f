//! # logsift - In-Memory Log Search Engine
//!
//! logsift is the indexing and query core of a log monitoring dashboard:
//! it ingests structured log entries, routes each into topic-based
//! secondary indices via declarative classification rules, and serves
//! ranked, filterable searches over the resulting collections.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`engine`] - The [`LogEngine`] facade: ingestion, search, index
//!   management, and statistics behind one owned handle
//! - [`index`] - Entry model, primary store, classification router,
//!   secondary index table, and aggregate statistics
//! - [`query`] - Text matching (literal and pattern), relevance scoring,
//!   and the search pipeline
//! - [`error`] - The typed error taxonomy
//!
//! ## Quick Start
//!
//! ```
//! use logsift::{EntryDraft, Level, LogEngine, QueryRequest};
//!
//! let engine = LogEngine::new();
//! engine
//!     .ingest(EntryDraft::new(Level::Error, "DatabaseManager", "connection failed"))
//!     .unwrap();
//!
//! let result = engine.search(&QueryRequest::literal("connection")).unwrap();
//! assert_eq!(result.matched_count, 1);
//! ```
//!
//! ## Guarantees
//!
//! Stored entries are immutable; relevance scores live in query-scoped
//! result items. Appends become visible in the primary store and every
//! target index atomically. Identical searches with no intervening writes
//! return identical results, order and scores included.

pub mod engine;
pub mod error;
pub mod index;
pub mod query;

pub use engine::{BulkOutcome, EngineConfig, LogEngine};
pub use error::{Error, Result};
pub use index::{
    DEFAULT_INDEX, EngineStats, EntryDraft, IndexRouter, Level, LogEntry, MetadataValue, Predicate,
    Rule,
};
pub use query::{MatchMode, QueryRequest, QueryResult, ScoredEntry};
