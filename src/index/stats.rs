use crate::index::store::LogStore;
use crate::index::table::IndexTable;
use ahash::RandomState;
use serde::Serialize;
use std::collections::HashMap;

/// Name-to-count mapping used throughout the stats object
pub type CountMap = HashMap<String, usize, RandomState>;

/// Aggregate counts derived from the store on demand.
///
/// Recomputed on every call; the corpus is in-memory and moderate-volume,
/// so no incremental maintenance is kept.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub total_entries: usize,
    /// Every existing index, empty ones included
    pub per_index: CountMap,
    pub per_level: CountMap,
    pub per_component: CountMap,
    pub total_queries: u64,
}

/// Full-scan aggregation: O(indices) for the index counts, O(entries) for
/// the level and component counts
pub fn compute_stats(store: &LogStore, table: &IndexTable, total_queries: u64) -> EngineStats {
    let mut per_index = CountMap::default();
    for (name, count) in table.counts() {
        per_index.insert(name.to_string(), count);
    }

    let mut per_level = CountMap::default();
    let mut per_component = CountMap::default();
    for entry in store.all() {
        *per_level.entry(entry.level.to_string()).or_insert(0) += 1;
        *per_component.entry(entry.component.clone()).or_insert(0) += 1;
    }

    EngineStats {
        total_entries: store.count(),
        per_index,
        per_level,
        per_component,
        total_queries,
    }
}
