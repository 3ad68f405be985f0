use crate::boost::ScoringPolicy;
use crate::error::{ConfigError, SearchError};
use crate::tokenizer::AnalyzerConfig;
use crate::weighting::WeightingParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_K: usize = 10;
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.055;

/// Per-query knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Size of the candidate window and the precision@k denominator.
    pub k: usize,
    /// Candidates need raw similarity strictly above this, in [0, 1).
    pub similarity_floor: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { k: DEFAULT_K, similarity_floor: DEFAULT_SIMILARITY_FLOOR }
    }
}

impl SearchParams {
    pub fn new(k: usize, similarity_floor: f64) -> Self { Self { k, similarity_floor } }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.k == 0 {
            return Err(SearchError::InvalidParameter { name: "k", reason: "must be a positive integer".into() });
        }
        if !(0.0..1.0).contains(&self.similarity_floor) {
            return Err(SearchError::InvalidParameter {
                name: "similarity_floor",
                reason: format!("must lie in [0, 1), got {}", self.similarity_floor),
            });
        }
        Ok(())
    }
}

/// Everything fixed at engine construction, plus default search params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub analyzer: AnalyzerConfig,
    pub weighting: WeightingParams,
    pub policy: ScoringPolicy,
    pub search: SearchParams,
}

impl EngineConfig {
    /// Read a JSON config file. Missing sections fall back to defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        self.search
            .validate()
            .map_err(|e| ConfigError::InvalidPolicy(format!("default search params: {e}")))
    }
}
