//! TF-IDF weighting over a built [`Vocabulary`].
//!
//! Document vectors are `tf × idf` per column, then L2-normalized, so cosine
//! similarity against an equally normalized query reduces to a dot product.

use crate::index::{TermId, TermWeightMatrix, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term-frequency transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfVariant {
    /// `tf = count`.
    #[default]
    Raw,
    /// `tf = 1 + ln(count)` for `count > 0`.
    Sublinear,
}

/// IDF transform. Both variants are 0 exactly when a term occurs in every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfVariant {
    /// `ln(N / df)`.
    Standard,
    /// `ln((1 + N) / (1 + df))`.
    #[default]
    Smoothed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingParams {
    pub tf: TfVariant,
    pub idf: IdfVariant,
}

pub fn tf_weight(count: u32, variant: TfVariant) -> f32 {
    if count == 0 { return 0.0; }
    match variant {
        TfVariant::Raw => count as f32,
        TfVariant::Sublinear => 1.0 + (count as f32).ln(),
    }
}

pub fn idf_weight(num_docs: u32, df: u32, variant: IdfVariant) -> f32 {
    let n = num_docs as f32;
    let idf = match variant {
        IdfVariant::Standard => {
            if df == 0 { 0.0 } else { (n / df as f32).ln() }
        }
        IdfVariant::Smoothed => ((1.0 + n) / (1.0 + df as f32)).ln(),
    };
    // df never exceeds N for a fitted vocabulary; guard anyway so weights stay non-negative.
    idf.max(0.0)
}

/// Scale `v` to unit length in place. Zero vectors stay zero. Returns the original norm.
pub fn l2_normalize(v: &mut [f32]) -> f32 {
    let norm = v.iter().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        for w in v.iter_mut() { *w /= norm; }
    }
    norm
}

/// The idf table of one fitted corpus.
#[derive(Debug, Clone)]
pub struct WeightingModel {
    params: WeightingParams,
    idf: Vec<f32>,
}

impl WeightingModel {
    pub fn new(vocabulary: &Vocabulary, params: WeightingParams) -> Self {
        let n = vocabulary.num_docs();
        let idf = (0..vocabulary.len() as TermId)
            .map(|tid| idf_weight(n, vocabulary.doc_frequency(tid), params.idf))
            .collect();
        Self { params, idf }
    }

    pub fn idf(&self, tid: TermId) -> f32 { self.idf.get(tid as usize).copied().unwrap_or(0.0) }

    /// Build the term-weight matrix, one row per token stream, in input order.
    pub fn fit<S: AsRef<str>>(&self, documents: &[Vec<S>], vocabulary: &Vocabulary) -> TermWeightMatrix {
        let rows = documents.iter().map(|tokens| self.weigh(tokens, vocabulary)).collect();
        TermWeightMatrix::from_rows(rows)
    }

    /// Unit-length tf-idf vector for one token stream. Out-of-vocabulary tokens are ignored.
    pub fn weigh<S: AsRef<str>>(&self, tokens: &[S], vocabulary: &Vocabulary) -> Vec<f32> {
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for term in tokens {
            if let Some(tid) = vocabulary.term_id(term.as_ref()) {
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
        }
        let mut row = vec![0.0f32; vocabulary.len()];
        for (tid, count) in tf_counts {
            row[tid as usize] = tf_weight(count, self.params.tf) * self.idf(tid);
        }
        l2_normalize(&mut row);
        row
    }
}
