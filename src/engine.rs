//! The engine facade exposed to the surrounding service layer.
//!
//! A [`LogEngine`] is an explicitly constructed, owned handle, created once
//! at service start and passed to callers; there is no process-wide
//! singleton. Writers (ingest, index management, rule changes) take the
//! exclusive lock for the duration of their mutation; readers (search,
//! stats) run concurrently and never observe a partial append: an entry
//! becomes visible in the store and every target index atomically, or not
//! at all.

use crate::error::Result;
use crate::index::entry::EntryDraft;
use crate::index::router::{IndexRouter, Rule};
use crate::index::stats::{EngineStats, compute_stats};
use crate::index::store::LogStore;
use crate::index::table::{DEFAULT_INDEX, IndexTable};
use crate::query::engine::{QueryEngine, QueryRequest, QueryResult};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the compiled-pattern LRU cache
    pub regex_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regex_cache_size: 64,
        }
    }
}

/// Aggregate outcome of a bulk ingestion; each entry is ingested
/// independently, so one failure never blocks the others
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub success_count: usize,
    pub error_count: usize,
}

/// Shared mutable engine state, guarded as one unit so appends are atomic
/// across the store and every target index
struct EngineState {
    store: LogStore,
    table: IndexTable,
    router: IndexRouter,
}

/// The log search/indexing engine core
pub struct LogEngine {
    state: RwLock<EngineState>,
    query_engine: QueryEngine,
    queries: AtomicU64,
}

impl LogEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: RwLock::new(EngineState {
                store: LogStore::new(),
                table: IndexTable::with_default_indices(),
                router: IndexRouter::with_defaults(),
            }),
            query_engine: QueryEngine::new(config.regex_cache_size),
            queries: AtomicU64::new(0),
        }
    }

    /// Validate and ingest one entry, returning its id.
    ///
    /// The entry lands in the default index unconditionally and in every
    /// index whose classification rule matches. Rules targeting a deleted
    /// index are skipped.
    pub fn ingest(&self, draft: EntryDraft) -> Result<String> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let entry = state.store.append(draft)?;
        state.table.insert(DEFAULT_INDEX, Arc::clone(&entry));
        for name in state.router.classify(&entry) {
            state.table.insert(name, Arc::clone(&entry));
        }
        debug!(id = %entry.id, level = %entry.level, "ingested entry");
        Ok(entry.id.clone())
    }

    /// Ingest a batch, aggregating per-entry outcomes
    pub fn bulk_ingest(&self, drafts: impl IntoIterator<Item = EntryDraft>) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for draft in drafts {
            match self.ingest(draft) {
                Ok(_) => outcome.success_count += 1,
                Err(err) => {
                    warn!(%err, "rejected entry during bulk ingest");
                    outcome.error_count += 1;
                }
            }
        }
        outcome
    }

    /// Execute a search request against one index.
    ///
    /// Every call, including failing ones, counts toward the query total
    /// reported by [`LogEngine::stats`]. Stored entries are never mutated.
    pub fn search(&self, request: &QueryRequest) -> Result<QueryResult> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let state = self.state.read();
        self.query_engine
            .search(&state.store, &state.table, request)
    }

    /// Create an empty custom index.
    ///
    /// It receives no automatic entries unless a rule targeting it is added
    /// via [`LogEngine::add_rule`].
    pub fn create_index(&self, name: &str) -> Result<()> {
        self.state.write().table.create(name)
    }

    /// Delete an index, dropping only its member list
    pub fn delete_index(&self, name: &str) -> Result<()> {
        self.state.write().table.delete(name)
    }

    /// Append a classification rule; applies to entries ingested afterwards
    pub fn add_rule(&self, rule: Rule) {
        self.state.write().router.add_rule(rule);
    }

    /// Aggregate counts over the whole corpus, recomputed per call
    pub fn stats(&self) -> EngineStats {
        let state = self.state.read();
        compute_stats(
            &state.store,
            &state.table,
            self.queries.load(Ordering::Relaxed),
        )
    }
}

impl Default for LogEngine {
    fn default() -> Self {
        Self::new()
    }
}
