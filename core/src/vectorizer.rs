//! Smoothed TF-IDF weighting with L2 normalization.

use crate::index::TermId;
use crate::vocabulary::Vocabulary;
use std::collections::BTreeMap;

/// Sparse, L2-normalized weights sorted by term id.
///
/// Either has Euclidean norm 1 or is empty (the zero vector).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    entries: Vec<(TermId, f64)>,
}

impl WeightVector {
    pub fn entries(&self) -> &[(TermId, f64)] { &self.entries }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, id: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&id, |&(t, _)| t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 { self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt() }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &WeightVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            if a == b {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// `ln((1 + n) / (1 + df)) + 1`, always positive.
pub fn idf(df: u32, num_docs: u32) -> f64 {
    ((1.0 + num_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Weight a tokenized text against a vocabulary. Terms missing from the vocabulary are ignored.
pub fn vectorize<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary) -> WeightVector {
    let mut tf: BTreeMap<TermId, u32> = BTreeMap::new();
    for token in tokens {
        if let Some(id) = vocabulary.id(token.as_ref()) {
            *tf.entry(id).or_insert(0) += 1;
        }
    }

    let n = vocabulary.num_docs();
    let mut entries: Vec<(TermId, f64)> = tf
        .into_iter()
        .map(|(id, count)| (id, count as f64 * idf(vocabulary.df(id), n)))
        .collect();

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return WeightVector::default();
    }
    for (_, w) in entries.iter_mut() {
        *w /= norm;
    }
    WeightVector { entries }
}
