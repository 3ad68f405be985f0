use crate::index::{DocId, TermWeightMatrix};
use crate::query::QueryVector;

/// Cosine similarity of two unit-length (or zero) vectors, clamped into [0, 1].
pub fn cosine(query: &[f32], doc: &[f32]) -> f64 {
    let dot: f64 = query.iter().zip(doc).map(|(q, d)| *q as f64 * *d as f64).sum();
    if dot.is_finite() { dot.clamp(0.0, 1.0) } else { 0.0 }
}

/// Score every document against the query.
/// Sorted by similarity descending, then doc id ascending so ties are reproducible.
pub fn rank(query: &QueryVector, matrix: &TermWeightMatrix) -> Vec<(DocId, f64)> {
    let mut scored: Vec<(DocId, f64)> = matrix
        .rows()
        .enumerate()
        .map(|(i, row)| (i as DocId, cosine(query.weights(), row)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored
}
