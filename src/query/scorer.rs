//! Relevance scoring for matched entries.
//!
//! Scores are deterministic per (entry, query text) and bounded, so result
//! ordering is reproducible across identical queries. They are computed into
//! query-scoped result items and never written back into stored entries.

use crate::index::entry::LogEntry;
use crate::query::engine::ScoredEntry;
use serde::{Deserialize, Serialize};

/// Ceiling applied to every relevance score
pub const MAX_SCORE: f32 = 3.0;

/// Configurable weights for the per-field relevance contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Added when the query text appears in the message
    pub message: f32,
    /// Added when it appears in the component
    pub component: f32,
    /// Added once when it appears in any metadata value
    pub metadata: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            message: 2.0,
            component: 1.0,
            metadata: 0.5,
        }
    }
}

/// Computes relevance scores and defines the result sort order
pub struct Ranker {
    weights: ScoreWeights,
}

impl Ranker {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoreWeights::default())
    }

    /// Score one matched entry against the raw query text.
    ///
    /// Empty text scores 0.0 for every entry; otherwise contributions are
    /// additive per field (metadata counted once, not per occurrence) and
    /// clamped to [`MAX_SCORE`].
    pub fn score(&self, entry: &LogEntry, text: &str, case_sensitive: bool) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let needle = if case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        };
        let contains = |field: &str| {
            if case_sensitive {
                field.contains(needle.as_str())
            } else {
                field.to_lowercase().contains(needle.as_str())
            }
        };

        let mut score = 0.0;
        if contains(&entry.message) {
            score += self.weights.message;
        }
        if contains(&entry.component) {
            score += self.weights.component;
        }
        if entry
            .metadata
            .values()
            .any(|value| contains(&value.to_string()))
        {
            score += self.weights.metadata;
        }

        score.min(MAX_SCORE)
    }

    /// Sort descending by (score, timestamp); remaining ties keep their
    /// original relative order (the sort is stable), which keeps identical
    /// queries byte-for-byte reproducible.
    pub fn sort(&self, results: &mut [ScoredEntry]) {
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.entry.timestamp.cmp(&a.entry.timestamp))
        });
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::entry::{EntryDraft, Level, MetadataValue};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn entry(component: &str, message: &str) -> LogEntry {
        EntryDraft::new(Level::Info, component, message)
            .validate()
            .unwrap()
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let ranker = Ranker::with_defaults();
        let e = entry("auth", "user logged in");
        assert_eq!(ranker.score(&e, "", false), 0.0);
    }

    #[test]
    fn test_field_contributions_are_additive() {
        let ranker = Ranker::with_defaults();

        let message_only = entry("db", "auth token expired");
        assert_eq!(ranker.score(&message_only, "auth", false), 2.0);

        let component_only = entry("auth", "token expired");
        assert_eq!(ranker.score(&component_only, "auth", false), 1.0);

        let both = entry("auth", "auth token expired");
        assert_eq!(ranker.score(&both, "auth", false), 3.0);
    }

    #[test]
    fn test_metadata_counted_once() {
        let ranker = Ranker::with_defaults();
        let e = EntryDraft::new(Level::Info, "db", "slow query")
            .with_metadata("table_a", MetadataValue::String("orders".into()))
            .with_metadata("table_b", MetadataValue::String("orders_archive".into()))
            .validate()
            .unwrap();
        assert_eq!(ranker.score(&e, "orders", false), 0.5);
    }

    #[test]
    fn test_score_is_clamped() {
        let ranker = Ranker::with_defaults();
        let e = EntryDraft::new(Level::Info, "auth", "auth failed")
            .with_metadata("module", MetadataValue::String("auth".into()))
            .validate()
            .unwrap();
        // 2.0 + 1.0 + 0.5 clamps to the ceiling
        assert_eq!(ranker.score(&e, "auth", false), MAX_SCORE);
    }

    #[test]
    fn test_case_sensitive_scoring() {
        let ranker = Ranker::with_defaults();
        let e = entry("AuthManager", "token issued");
        assert_eq!(ranker.score(&e, "authmanager", true), 0.0);
        assert_eq!(ranker.score(&e, "authmanager", false), 1.0);
    }

    #[test]
    fn test_sort_by_score_then_timestamp() {
        let ranker = Ranker::with_defaults();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();

        let older_high = EntryDraft::new(Level::Info, "a", "match in message")
            .with_timestamp(t0)
            .validate()
            .unwrap();
        let newer_high = EntryDraft::new(Level::Info, "b", "match in message")
            .with_timestamp(t1)
            .validate()
            .unwrap();
        let low = EntryDraft::new(Level::Info, "match", "nothing here")
            .with_timestamp(t1)
            .validate()
            .unwrap();

        let mut results: Vec<ScoredEntry> = [&older_high, &newer_high, &low]
            .into_iter()
            .map(|e| ScoredEntry {
                score: ranker.score(e, "match", false),
                entry: Arc::new(e.clone()),
            })
            .collect();

        ranker.sort(&mut results);

        // Higher scores first; equal scores break ties by newer timestamp
        assert_eq!(results[0].entry.component, "b");
        assert_eq!(results[1].entry.component, "a");
        assert_eq!(results[2].entry.component, "match");
    }
}
