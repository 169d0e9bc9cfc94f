use crate::error::{Error, Result};
use crate::index::entry::LogEntry;
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;

/// Name of the mandatory default index that receives every entry
pub const DEFAULT_INDEX: &str = "system_logs";

/// Ordered member list of one index, with per-index id dedup
#[derive(Debug, Default)]
struct Bucket {
    members: Vec<Arc<LogEntry>>,
    seen: AHashSet<String>,
}

impl Bucket {
    /// Append the entry unless this index already holds it
    fn insert(&mut self, entry: Arc<LogEntry>) -> bool {
        if self.seen.insert(entry.id.clone()) {
            self.members.push(entry);
            true
        } else {
            false
        }
    }
}

/// Mapping from index name to its ordered member list.
///
/// Members are appended during ingestion and never reordered in storage;
/// queries reorder their own result view.
#[derive(Debug)]
pub struct IndexTable {
    buckets: AHashMap<String, Bucket>,
}

impl IndexTable {
    /// Table holding only the default index
    pub fn new() -> Self {
        let mut buckets = AHashMap::new();
        buckets.insert(DEFAULT_INDEX.to_string(), Bucket::default());
        Self { buckets }
    }

    /// Table with the default index plus the targets of the default rule set
    pub fn with_default_indices() -> Self {
        let mut table = Self::new();
        for name in ["error_logs", "security_logs", "performance_logs", "family_logs"] {
            table.buckets.insert(name.to_string(), Bucket::default());
        }
        table
    }

    /// Create an empty index
    pub fn create(&mut self, name: &str) -> Result<()> {
        if self.buckets.contains_key(name) {
            return Err(Error::IndexExists(name.to_string()));
        }
        self.buckets.insert(name.to_string(), Bucket::default());
        Ok(())
    }

    /// Drop an index and its member list.
    ///
    /// The default index is protected; stored entries are owned by the
    /// primary store and survive any index deletion.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if name == DEFAULT_INDEX {
            return Err(Error::ProtectedIndex(name.to_string()));
        }
        self.buckets
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::IndexNotFound(name.to_string()))
    }

    /// Insert an entry into the named index.
    ///
    /// Returns false when the index does not exist or already holds the
    /// entry; routing to a deleted rule target is silently skipped.
    pub fn insert(&mut self, name: &str, entry: Arc<LogEntry>) -> bool {
        match self.buckets.get_mut(name) {
            Some(bucket) => bucket.insert(entry),
            None => false,
        }
    }

    /// Member list of the named index, in insertion order
    pub fn members(&self, name: &str) -> Option<&[Arc<LogEntry>]> {
        self.buckets.get(name).map(|b| b.members.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// All index names (unordered) with their member counts
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.buckets
            .iter()
            .map(|(name, bucket)| (name.as_str(), bucket.members.len()))
    }
}

impl Default for IndexTable {
    fn default() -> Self {
        Self::with_default_indices()
    }
}
