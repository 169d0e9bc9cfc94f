use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All levels in severity order
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            other => Err(Error::InvalidEntry(format!("unknown level: {other}"))),
        }
    }
}

/// A scalar metadata value attached to an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(x) => write!(f, "{x}"),
            MetadataValue::String(s) => f.write_str(s),
        }
    }
}

/// One immutable log record.
///
/// Built from an [`EntryDraft`] at ingestion and never modified afterwards.
/// Relevance scores computed during a query live in the query result, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub component: String,
    pub message: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
}

/// Inbound entry as submitted by an ingestion endpoint.
///
/// The level arrives as free text and the id/timestamp may be absent; both
/// are resolved by [`EntryDraft::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub level: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl EntryDraft {
    /// Convenience constructor for programmatic ingestion
    pub fn new(level: Level, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp: None,
            level: level.as_str().to_string(),
            component: component.into(),
            message: Some(message.into()),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata value
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Pin the timestamp (defaults to ingestion time)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate the draft into an immutable entry.
    ///
    /// Fails with [`Error::InvalidEntry`] when the level is outside the fixed
    /// set or the message is missing. A missing id becomes a fresh UUID; a
    /// missing timestamp becomes the current time.
    pub fn validate(self) -> Result<LogEntry> {
        let level = self.level.parse::<Level>()?;
        let message = self
            .message
            .ok_or_else(|| Error::InvalidEntry("missing message".to_string()))?;

        Ok(LogEntry {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            level,
            component: self.component,
            message,
            metadata: self.metadata,
        })
    }
}
