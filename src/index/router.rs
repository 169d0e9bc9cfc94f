use crate::index::entry::{Level, LogEntry};
use serde::{Deserialize, Serialize};

/// Case-insensitive substring check
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Declarative condition a rule evaluates against an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Predicate {
    /// Entry level is one of the given levels
    LevelIn(Vec<Level>),
    /// Component contains the given text, case-insensitive
    ComponentContains(String),
    /// Message contains the given text, case-insensitive
    MessageContains(String),
    /// At least one inner predicate matches
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            Predicate::LevelIn(levels) => levels.contains(&entry.level),
            Predicate::ComponentContains(text) => contains_ci(&entry.component, text),
            Predicate::MessageContains(text) => contains_ci(&entry.message, text),
            Predicate::AnyOf(inner) => inner.iter().any(|p| p.matches(entry)),
        }
    }
}

/// One classification rule: entries matching the predicate are routed into
/// the named index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub index: String,
    pub predicate: Predicate,
}

impl Rule {
    pub fn new(index: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            index: index.into(),
            predicate,
        }
    }
}

/// Routes entries into secondary indices via an ordered rule list.
///
/// Classification is a pure function of the entry; the rule list is only
/// extended through [`IndexRouter::add_rule`], so new indices can receive
/// traffic without touching the evaluation loop.
#[derive(Debug, Clone)]
pub struct IndexRouter {
    rules: Vec<Rule>,
}

impl IndexRouter {
    /// Router with no rules at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Router with the default rule set:
    ///
    /// - `error_logs`: level is ERROR or CRITICAL
    /// - `security_logs`: component contains "security" or "threat"
    /// - `performance_logs`: component contains "performance" or message contains "cpu"
    /// - `family_logs`: component contains "family" or message contains "child"
    pub fn with_defaults() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    "error_logs",
                    Predicate::LevelIn(vec![Level::Error, Level::Critical]),
                ),
                Rule::new(
                    "security_logs",
                    Predicate::AnyOf(vec![
                        Predicate::ComponentContains("security".to_string()),
                        Predicate::ComponentContains("threat".to_string()),
                    ]),
                ),
                Rule::new(
                    "performance_logs",
                    Predicate::AnyOf(vec![
                        Predicate::ComponentContains("performance".to_string()),
                        Predicate::MessageContains("cpu".to_string()),
                    ]),
                ),
                Rule::new(
                    "family_logs",
                    Predicate::AnyOf(vec![
                        Predicate::ComponentContains("family".to_string()),
                        Predicate::MessageContains("child".to_string()),
                    ]),
                ),
            ],
        }
    }

    /// Append a rule; it applies only to entries ingested afterwards
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Index names whose rules match the entry, in rule order, deduplicated.
    ///
    /// The mandatory default index is not part of the rule list; the caller
    /// inserts into it unconditionally.
    pub fn classify(&self, entry: &LogEntry) -> Vec<&str> {
        let mut matched: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if rule.predicate.matches(entry) && !matched.contains(&rule.index.as_str()) {
                matched.push(rule.index.as_str());
            }
        }
        matched
    }
}

impl Default for IndexRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
