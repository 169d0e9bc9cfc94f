//! Text matching for search queries.
//!
//! A query's text is compiled once per search into a [`CompiledText`], then
//! evaluated against each candidate entry with no shared mutable state.
//! Pattern compilation goes through a per-(pattern, case flag) LRU cache so
//! repeated identical queries skip recompilation.

use crate::error::Result;
use crate::index::entry::LogEntry;
use lru::LruCache;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// How the query text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring matching
    #[default]
    Literal,
    /// Regular-expression matching
    Pattern,
}

/// Query text compiled for repeated per-entry evaluation
#[derive(Debug, Clone)]
pub enum CompiledText {
    /// Empty text matches every entry
    Empty,
    Literal {
        /// Pre-folded when the match is case-insensitive
        needle: String,
        case_sensitive: bool,
    },
    Pattern(Regex),
}

impl CompiledText {
    /// Check the entry's message, component, then metadata values, in that
    /// order; the first hit short-circuits.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            CompiledText::Empty => true,
            CompiledText::Literal {
                needle,
                case_sensitive,
            } => {
                let contains = |field: &str| {
                    if *case_sensitive {
                        field.contains(needle.as_str())
                    } else {
                        field.to_lowercase().contains(needle.as_str())
                    }
                };
                contains(&entry.message)
                    || contains(&entry.component)
                    || entry
                        .metadata
                        .values()
                        .any(|value| contains(&value.to_string()))
            }
            CompiledText::Pattern(re) => {
                re.is_match(&entry.message)
                    || re.is_match(&entry.component)
                    || entry
                        .metadata
                        .values()
                        .any(|value| re.is_match(&value.to_string()))
            }
        }
    }
}

/// Compiles query text, caching compiled patterns across queries
pub struct Matcher {
    cache: Mutex<LruCache<(String, bool), Regex>>,
}

impl Matcher {
    pub fn new(cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Compile query text for the given mode.
    ///
    /// Fails with [`crate::error::Error::Pattern`] only in pattern mode when
    /// the text does not compile; the failure is terminal for the whole
    /// query, never skipped per entry.
    pub fn compile(&self, text: &str, mode: MatchMode, case_sensitive: bool) -> Result<CompiledText> {
        if text.is_empty() {
            return Ok(CompiledText::Empty);
        }

        match mode {
            MatchMode::Literal => Ok(CompiledText::Literal {
                needle: if case_sensitive {
                    text.to_string()
                } else {
                    text.to_lowercase()
                },
                case_sensitive,
            }),
            MatchMode::Pattern => {
                let key = (text.to_string(), case_sensitive);
                if let Some(re) = self.cache.lock().get(&key) {
                    return Ok(CompiledText::Pattern(re.clone()));
                }

                let re = RegexBuilder::new(text)
                    .case_insensitive(!case_sensitive)
                    .build()?;
                self.cache.lock().put(key, re.clone());
                Ok(CompiledText::Pattern(re))
            }
        }
    }
}
