use crate::index::Vocabulary;
use crate::weighting::WeightingModel;

/// Per-search query vector in the vocabulary space of one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    weights: Vec<f32>,
    matched_terms: usize,
}

impl QueryVector {
    pub fn weights(&self) -> &[f32] { &self.weights }

    /// Number of query tokens found in the vocabulary (with repeats).
    pub fn matched_terms(&self) -> usize { self.matched_terms }

    /// No query token is in the vocabulary; every similarity will be 0.
    pub fn is_degenerate(&self) -> bool { self.matched_terms == 0 }
}

/// Map normalized query tokens into the same tf-idf space as the documents.
pub fn vectorize<S: AsRef<str>>(query_tokens: &[S], vocabulary: &Vocabulary, model: &WeightingModel) -> QueryVector {
    let matched_terms = query_tokens
        .iter()
        .filter(|t| vocabulary.term_id(t.as_ref()).is_some())
        .count();
    QueryVector { weights: model.weigh(query_tokens, vocabulary), matched_terms }
}
