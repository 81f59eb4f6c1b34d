//! Term dictionary and corpus document frequencies, rebuilt on every search.

use crate::index::TermId;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Dense term → index mapping plus per-term document frequency.
///
/// Indices follow the lexicographic order of the terms, so two builds over
/// the same input are identical. Document frequency counts corpus documents
/// only; terms that occur only in the query have `df == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    num_docs: u32,
}

impl Vocabulary {
    /// Build from tokenized corpus documents and the tokenized query.
    pub fn build<D, Q>(documents: &[D], query: &[Q]) -> Self
    where
        D: AsRef<[String]>,
        Q: AsRef<str>,
    {
        let mut ordered: BTreeSet<&str> = BTreeSet::new();
        for doc in documents {
            ordered.extend(doc.as_ref().iter().map(String::as_str));
        }
        ordered.extend(query.iter().map(AsRef::as_ref));

        let terms: Vec<String> = ordered.into_iter().map(str::to_string).collect();
        let dictionary: HashMap<String, TermId> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as TermId))
            .collect();

        let mut df = vec![0u32; terms.len()];
        for doc in documents {
            let seen: HashSet<&str> = doc.as_ref().iter().map(String::as_str).collect();
            for term in seen {
                df[dictionary[term] as usize] += 1;
            }
        }

        Self { terms, dictionary, df, num_docs: documents.len() as u32 }
    }

    pub fn id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn df(&self, id: TermId) -> u32 { self.df.get(id as usize).copied().unwrap_or(0) }

    pub fn document_frequencies(&self) -> &[u32] { &self.df }

    /// Number of corpus documents the frequencies were counted over.
    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] { &self.terms }
}
