pub mod engine;
pub mod matcher;
pub mod scorer;

pub use engine::{QueryEngine, QueryRequest, QueryResult, ScoredEntry};
pub use matcher::{CompiledText, MatchMode, Matcher};
pub use scorer::{MAX_SCORE, Ranker, ScoreWeights};
