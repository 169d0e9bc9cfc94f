pub mod entry;
pub mod router;
pub mod stats;
pub mod store;
pub mod table;

pub use entry::{EntryDraft, Level, LogEntry, MetadataValue};
pub use router::{IndexRouter, Predicate, Rule};
pub use stats::EngineStats;
pub use store::LogStore;
pub use table::{DEFAULT_INDEX, IndexTable};
