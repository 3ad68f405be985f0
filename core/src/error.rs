use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort engine construction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No documents, or no token survived normalization in any document.
    #[error("empty corpus: no documents or no tokens to build a vocabulary from")]
    EmptyCorpus,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A rejected search request. Never fatal to the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}
