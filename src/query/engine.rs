//! Search orchestration: filter, match, score, sort, truncate.

use crate::error::{Error, Result};
use crate::index::entry::{Level, LogEntry};
use crate::index::store::LogStore;
use crate::index::table::{DEFAULT_INDEX, IndexTable};
use crate::query::matcher::{MatchMode, Matcher};
use crate::query::scorer::Ranker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One search request against a single index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    /// Literal text or pattern; empty text matches every entry
    pub text: String,
    pub mode: MatchMode,
    pub case_sensitive: bool,
    /// Exact level filter
    pub level: Option<Level>,
    /// Case-insensitive component substring filter
    pub component: Option<String>,
    /// Inclusive lower bound on the entry timestamp
    pub time_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the entry timestamp
    pub time_to: Option<DateTime<Utc>>,
    /// Index to search, defaulting to the mandatory default index
    pub index: String,
    /// Maximum entries to return; zero or negative means no truncation
    pub limit: i64,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            mode: MatchMode::Literal,
            case_sensitive: false,
            level: None,
            component: None,
            time_from: None,
            time_to: None,
            index: DEFAULT_INDEX.to_string(),
            limit: 0,
        }
    }
}

impl QueryRequest {
    /// Case-insensitive literal search over the default index
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Case-insensitive pattern search over the default index
    pub fn pattern(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: MatchMode::Pattern,
            ..Self::default()
        }
    }
}

/// A matched entry with its query-scoped relevance score.
///
/// The score lives here, never in the stored entry.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: Arc<LogEntry>,
    pub score: f32,
}

/// Result of one search call
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Entries actually returned, post-truncation
    pub matched_count: usize,
    /// Full corpus size, independent of the query
    pub total_count: usize,
    pub entries: Vec<ScoredEntry>,
    /// Populated instead of entries only when pattern compilation fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    /// Wire representation of a failed query, for transports that carry the
    /// error inside the result object
    pub fn failure(total_count: usize, message: impl Into<String>) -> Self {
        Self {
            matched_count: 0,
            total_count,
            entries: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Runs one search over an index: resolve, filter, match, score, sort,
/// truncate. Holds the pattern cache and scoring weights; all per-query
/// state is local to the call.
pub struct QueryEngine {
    matcher: Matcher,
    ranker: Ranker,
}

impl QueryEngine {
    pub fn new(regex_cache_size: usize) -> Self {
        Self {
            matcher: Matcher::new(regex_cache_size),
            ranker: Ranker::with_defaults(),
        }
    }

    /// Execute a search request.
    ///
    /// An unknown index fails with [`Error::IndexNotFound`]; an uncompilable
    /// pattern fails with [`Error::Pattern`] before any entry is matched.
    pub fn search(
        &self,
        store: &LogStore,
        table: &IndexTable,
        request: &QueryRequest,
    ) -> Result<QueryResult> {
        let members = table
            .members(&request.index)
            .ok_or_else(|| Error::IndexNotFound(request.index.clone()))?;

        let compiled = self
            .matcher
            .compile(&request.text, request.mode, request.case_sensitive)?;

        let component_filter = request.component.as_deref().map(str::to_lowercase);

        let mut hits: Vec<ScoredEntry> = Vec::new();
        for entry in members {
            if let Some(level) = request.level {
                if entry.level != level {
                    continue;
                }
            }
            if let Some(ref needle) = component_filter {
                if !entry.component.to_lowercase().contains(needle) {
                    continue;
                }
            }
            if let Some(from) = request.time_from {
                if entry.timestamp < from {
                    continue;
                }
            }
            if let Some(to) = request.time_to {
                if entry.timestamp > to {
                    continue;
                }
            }
            if !compiled.matches(entry) {
                continue;
            }

            let score = self
                .ranker
                .score(entry, &request.text, request.case_sensitive);
            hits.push(ScoredEntry {
                entry: Arc::clone(entry),
                score,
            });
        }

        self.ranker.sort(&mut hits);

        if request.limit > 0 {
            hits.truncate(request.limit as usize);
        }

        debug!(
            index = %request.index,
            matched = hits.len(),
            corpus = store.count(),
            "search completed"
        );

        Ok(QueryResult {
            matched_count: hits.len(),
            total_count: store.count(),
            entries: hits,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::entry::EntryDraft;
    use chrono::{TimeZone, Utc};

    fn fixture() -> (LogStore, IndexTable) {
        let mut store = LogStore::new();
        let mut table = IndexTable::new();
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let drafts = [
            EntryDraft::new(Level::Error, "DatabaseManager", "connection failed"),
            EntryDraft::new(Level::Info, "AuthenticationManager", "user logged in"),
            EntryDraft::new(Level::Warning, "Scheduler", "cpu usage high"),
        ];
        for (i, draft) in drafts.into_iter().enumerate() {
            let entry = store
                .append(draft.with_timestamp(base + chrono::Duration::seconds(i as i64)))
                .unwrap();
            table.insert(DEFAULT_INDEX, entry);
        }
        (store, table)
    }

    #[test]
    fn test_unknown_index_fails() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let request = QueryRequest {
            index: "missing".to_string(),
            ..QueryRequest::default()
        };
        assert!(matches!(
            engine.search(&store, &table, &request),
            Err(Error::IndexNotFound(_))
        ));
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let result = engine
            .search(&store, &table, &QueryRequest::default())
            .unwrap();
        assert_eq!(result.matched_count, 3);
        assert_eq!(result.total_count, 3);
        assert!(result.entries.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_level_filter() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let request = QueryRequest {
            level: Some(Level::Error),
            ..QueryRequest::default()
        };
        let result = engine.search(&store, &table, &request).unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.total_count, 3);
        assert_eq!(result.entries[0].entry.component, "DatabaseManager");
    }

    #[test]
    fn test_component_filter_is_ci_substring() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let request = QueryRequest {
            component: Some("manager".to_string()),
            ..QueryRequest::default()
        };
        let result = engine.search(&store, &table, &request).unwrap();
        assert_eq!(result.matched_count, 2);
    }

    #[test]
    fn test_time_range_is_inclusive() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let request = QueryRequest {
            time_from: Some(base),
            time_to: Some(base + chrono::Duration::seconds(1)),
            ..QueryRequest::default()
        };
        let result = engine.search(&store, &table, &request).unwrap();
        assert_eq!(result.matched_count, 2);
    }

    #[test]
    fn test_limit_truncates_and_nonpositive_means_unbounded() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);

        let limited = engine
            .search(
                &store,
                &table,
                &QueryRequest {
                    limit: 2,
                    ..QueryRequest::default()
                },
            )
            .unwrap();
        assert_eq!(limited.matched_count, 2);
        assert_eq!(limited.total_count, 3);

        for limit in [0, -5] {
            let unbounded = engine
                .search(
                    &store,
                    &table,
                    &QueryRequest {
                        limit,
                        ..QueryRequest::default()
                    },
                )
                .unwrap();
            assert_eq!(unbounded.matched_count, 3);
        }
    }

    #[test]
    fn test_bad_pattern_fails_whole_query() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let result = engine.search(&store, &table, &QueryRequest::pattern("[unbalanced"));
        assert!(matches!(result, Err(Error::Pattern(_))));
    }

    #[test]
    fn test_identical_queries_are_idempotent() {
        let (store, table) = fixture();
        let engine = QueryEngine::new(8);
        let request = QueryRequest::literal("manager");

        let first = engine.search(&store, &table, &request).unwrap();
        let second = engine.search(&store, &table, &request).unwrap();

        let ids = |r: &QueryResult| {
            r.entries
                .iter()
                .map(|s| (s.entry.id.clone(), s.score))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }
}
