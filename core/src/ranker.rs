use crate::index::{Document, ScoredResult};
use crate::vectorizer::WeightVector;
use std::cmp::Ordering;

/// Cosine similarity of two L2-normalized vectors.
pub fn cosine(query: &WeightVector, document: &WeightVector) -> f64 {
    query.dot(document)
}

/// Score, filter (`score > threshold`), sort descending and truncate.
pub fn rank<'a>(
    query: &WeightVector,
    document_vectors: &[WeightVector],
    documents: &'a [Document],
    top_k: usize,
    threshold: f64,
) -> Vec<ScoredResult<'a>> {
    let mut scored = rank_all(query, document_vectors, documents, threshold);
    scored.truncate(top_k);
    scored
}

/// Every document scoring above `threshold`, best first.
///
/// `document_vectors` and `documents` are parallel slices. Equal scores keep
/// corpus order because the sort is stable.
pub fn rank_all<'a>(
    query: &WeightVector,
    document_vectors: &[WeightVector],
    documents: &'a [Document],
    threshold: f64,
) -> Vec<ScoredResult<'a>> {
    if query.is_zero() {
        return Vec::new();
    }
    let mut scored: Vec<ScoredResult<'a>> = document_vectors
        .iter()
        .zip(documents)
        .enumerate()
        .filter_map(|(position, (vector, document))| {
            // rounding can push a self-match a hair above 1
            let score = cosine(query, vector).min(1.0);
            (score > threshold).then_some(ScoredResult { position, document, score })
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}
