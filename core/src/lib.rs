//! Retrieval and ranking core for the game-record search engine.
//!
//! A [`SearchEngine`] is built once from a corpus of [`Document`]s and then
//! answers any number of queries through `&self`: TF-IDF cosine ranking over a
//! dense term-weight matrix, exact-match boosting against titles and metadata,
//! relevance banding and precision@k.

pub mod boost;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod rank;
pub mod tokenizer;
pub mod weighting;

pub use boost::{MatchCounts, QueryMatcher, Relevance, ScoringPolicy};
pub use config::{EngineConfig, SearchParams};
pub use engine::{SearchEngine, SearchHit, SearchReport, SearchStatus};
pub use error::{BuildError, ConfigError, SearchError};
pub use index::*;
