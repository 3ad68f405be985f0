//! Exact-match boosting and relevance banding.
//!
//! The composite score is
//! `similarity × 100 + title_matches × title_boost + metadata_matches × metadata_boost + baseline`,
//! clamped to `[0, 100]`, then mapped onto three ordered [`Relevance`] bands.

use crate::error::ConfigError;
use crate::index::Document;
use crate::tokenizer::Analyzer;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points per exact query-term occurrence in the title.
pub const TITLE_MATCH_BOOST: f64 = 10.0;
/// Points per exact query-term occurrence in any metadata value.
pub const METADATA_MATCH_BOOST: f64 = 5.0;
/// Added to every candidate that cleared the similarity floor.
pub const BASELINE_BOOST: f64 = 65.0;
/// Composite scores strictly above this are `High relevance`.
pub const HIGH_RELEVANCE_THRESHOLD: f64 = 75.0;
/// Composite scores strictly above this (and not high) are `Relevant`.
pub const RELEVANT_THRESHOLD: f64 = 50.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relevance {
    #[serde(rename = "Less relevant")]
    LessRelevant,
    #[serde(rename = "Relevant")]
    Relevant,
    #[serde(rename = "High relevance")]
    High,
}

impl Relevance {
    pub fn label(&self) -> &'static str {
        match self {
            Relevance::LessRelevant => "Less relevant",
            Relevance::Relevant => "Relevant",
            Relevance::High => "High relevance",
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    pub title: usize,
    pub metadata: usize,
}

lazy_static! {
    // Same notion of word character as the `\b` in the match patterns.
    static ref TERM_EDGES: Regex = Regex::new(r"^\W+|\W+$").expect("valid regex");
}

/// Case-insensitive, word-bounded patterns for each distinct raw query term.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    patterns: Vec<Regex>,
}

impl QueryMatcher {
    /// Split the raw (un-normalized) query on whitespace and trim non-word edges from each term.
    /// Terms the analyzer would discard (stopwords, too short) never count as matches.
    pub fn new(raw_query: &str, analyzer: &Analyzer) -> Self {
        let mut terms: Vec<String> = Vec::new();
        for word in raw_query.split_whitespace() {
            let term = TERM_EDGES.replace_all(word, "").to_lowercase();
            if !term.is_empty() && analyzer.keeps(&term) && !terms.contains(&term) {
                terms.push(term);
            }
        }
        let patterns = terms
            .iter()
            .filter_map(|t| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(t)))
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }

    /// Total occurrences of all query terms in `haystack`.
    pub fn count(&self, haystack: &str) -> usize {
        self.patterns.iter().map(|p| p.find_iter(haystack).count()).sum()
    }

    /// Missing title or metadata simply counts zero.
    pub fn match_counts(&self, document: &Document) -> MatchCounts {
        MatchCounts {
            title: document.title.as_deref().map_or(0, |t| self.count(t)),
            metadata: document.metadata.values().map(|v| self.count(v)).sum(),
        }
    }
}

/// Outcome of boosting one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostedScore {
    pub matches: MatchCounts,
    pub composite: f64,
    pub relevance: Relevance,
}

/// Tunable score-fusion weights and band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub title_match_boost: f64,
    pub metadata_match_boost: f64,
    /// Unconditional lift for every floor-qualified candidate. Alone it puts a
    /// metadata-less hit at `Relevant`; keep it explicit when tuning.
    pub baseline: f64,
    pub high_threshold: f64,
    pub relevant_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            title_match_boost: TITLE_MATCH_BOOST,
            metadata_match_boost: METADATA_MATCH_BOOST,
            baseline: BASELINE_BOOST,
            high_threshold: HIGH_RELEVANCE_THRESHOLD,
            relevant_threshold: RELEVANT_THRESHOLD,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("title_match_boost", self.title_match_boost),
            ("metadata_match_boost", self.metadata_match_boost),
            ("baseline", self.baseline),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::InvalidPolicy(format!("{name} must be a non-negative number, got {w}")));
            }
        }
        for (name, t) in [("high_threshold", self.high_threshold), ("relevant_threshold", self.relevant_threshold)] {
            if !(0.0..=MAX_SCORE).contains(&t) {
                return Err(ConfigError::InvalidPolicy(format!("{name} must lie in [0, {}], got {t}", MAX_SCORE)));
            }
        }
        if self.relevant_threshold > self.high_threshold {
            return Err(ConfigError::InvalidPolicy(format!(
                "relevant_threshold ({}) exceeds high_threshold ({})",
                self.relevant_threshold, self.high_threshold
            )));
        }
        Ok(())
    }

    /// `similarity` is the raw cosine in [0, 1].
    pub fn composite(&self, similarity: f64, matches: MatchCounts) -> f64 {
        let score = similarity * 100.0
            + matches.title as f64 * self.title_match_boost
            + matches.metadata as f64 * self.metadata_match_boost
            + self.baseline;
        score.clamp(0.0, MAX_SCORE)
    }

    pub fn classify(&self, composite: f64) -> Relevance {
        if composite > self.high_threshold {
            Relevance::High
        } else if composite > self.relevant_threshold {
            Relevance::Relevant
        } else {
            Relevance::LessRelevant
        }
    }

    pub fn score(&self, raw_query: &str, analyzer: &Analyzer, document: &Document, similarity: f64) -> BoostedScore {
        self.score_with(&QueryMatcher::new(raw_query, analyzer), document, similarity)
    }

    /// Same as [`score`](Self::score) with patterns compiled once per query.
    pub fn score_with(&self, matcher: &QueryMatcher, document: &Document, similarity: f64) -> BoostedScore {
        let matches = matcher.match_counts(document);
        let composite = self.composite(similarity, matches);
        BoostedScore { matches, composite, relevance: self.classify(composite) }
    }
}
