use crate::error::Result;
use crate::index::entry::{EntryDraft, LogEntry};
use std::sync::Arc;
use tracing::trace;

/// Append-only primary collection of every ingested entry.
///
/// Entries are shared with the secondary indices via `Arc`, so the store is
/// the single owner of record and the indices hold cheap references.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<Arc<LogEntry>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a draft, returning the stored entry.
    ///
    /// A rejected draft leaves the store untouched.
    pub fn append(&mut self, draft: EntryDraft) -> Result<Arc<LogEntry>> {
        let entry = Arc::new(draft.validate()?);
        trace!(id = %entry.id, level = %entry.level, "stored entry");
        self.entries.push(Arc::clone(&entry));
        Ok(entry)
    }

    /// Full primary sequence in insertion order
    pub fn all(&self) -> &[Arc<LogEntry>] {
        &self.entries
    }

    /// Number of stored entries, O(1)
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
