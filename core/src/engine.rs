use crate::config::{validate_top_k, SearchConfig};
use crate::error::Result;
use crate::index::{Corpus, ScoredResult};
use crate::ranker::rank_all;
use crate::tokenizer::tokenize;
use crate::vectorizer::{vectorize, WeightVector};
use crate::vocabulary::Vocabulary;
use rayon::prelude::*;

/// The first `top_k` matches plus how many documents matched in total.
#[derive(Debug, Clone, PartialEq)]
pub struct Hits<'a> {
    pub total: usize,
    pub results: Vec<ScoredResult<'a>>,
}

/// A validated search configuration.
///
/// Holds no index: every call rebuilds vocabulary and weights from the corpus
/// it is given, so one engine can serve concurrent searches over any corpora.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SearchConfig,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    /// Rank `corpus` against `query`, best first, at most `top_k` results.
    ///
    /// A blank query or an empty corpus returns no results.
    pub fn search<'a>(&self, corpus: &'a Corpus, query: &str) -> Vec<ScoredResult<'a>> {
        self.search_hits(corpus, query, self.config.top_k).results
    }

    /// Same as [`Engine::search`] with a per-call result limit.
    pub fn search_with_top_k<'a>(
        &self,
        corpus: &'a Corpus,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredResult<'a>>> {
        validate_top_k(top_k)?;
        Ok(self.search_hits(corpus, query, top_k).results)
    }

    /// Like [`Engine::search_with_top_k`], also reporting the match count before truncation.
    pub fn search_with_total<'a>(&self, corpus: &'a Corpus, query: &str, top_k: usize) -> Result<Hits<'a>> {
        validate_top_k(top_k)?;
        Ok(self.search_hits(corpus, query, top_k))
    }

    fn search_hits<'a>(&self, corpus: &'a Corpus, query: &str, top_k: usize) -> Hits<'a> {
        let mut results = self.run(corpus, query);
        let total = results.len();
        results.truncate(top_k);
        Hits { total, results }
    }

    fn run<'a>(&self, corpus: &'a Corpus, query: &str) -> Vec<ScoredResult<'a>> {
        let query = query.trim();
        if query.is_empty() || corpus.is_empty() {
            tracing::debug!(docs = corpus.len(), "blank query or empty corpus");
            return Vec::new();
        }

        let opts = &self.config.tokenizer;
        let q_tokens = tokenize(query, opts);
        let doc_tokens: Vec<Vec<String>> = if self.config.parallel {
            corpus.documents().par_iter().map(|d| tokenize(&d.content, opts)).collect()
        } else {
            corpus.iter().map(|d| tokenize(&d.content, opts)).collect()
        };

        let vocabulary = Vocabulary::build(&doc_tokens, &q_tokens);
        if vocabulary.is_empty() {
            tracing::debug!(docs = corpus.len(), "empty vocabulary");
            return Vec::new();
        }

        let doc_vectors: Vec<WeightVector> = if self.config.parallel {
            doc_tokens.par_iter().map(|t| vectorize(t, &vocabulary)).collect()
        } else {
            doc_tokens.iter().map(|t| vectorize(t, &vocabulary)).collect()
        };
        let q_vector = vectorize(&q_tokens, &vocabulary);

        let results = rank_all(&q_vector, &doc_vectors, corpus.documents(), self.config.score_threshold);
        tracing::debug!(
            docs = corpus.len(),
            vocabulary = vocabulary.len(),
            query_terms = q_tokens.len(),
            matches = results.len(),
            "search complete"
        );
        results
    }
}

/// Validate `config`, then search. Configuration errors are the only failure.
pub fn search<'a>(corpus: &'a Corpus, query: &str, config: &SearchConfig) -> Result<Vec<ScoredResult<'a>>> {
    let engine = Engine::new(config.clone())?;
    Ok(engine.search(corpus, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Document;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Document::new("1", "Dune", "Herbert", "desert planet spice empire"),
            Document::new("2", "Hobbit", "Tolkien", "mountain dragon journey"),
        ])
    }

    #[test]
    fn query_is_trimmed() {
        let engine = Engine::new(SearchConfig::default()).unwrap();
        let c = corpus();
        let a = engine.search(&c, "  spice  ");
        let b = engine.search(&c, "spice");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn invalid_config_fails_fast() {
        assert!(Engine::new(SearchConfig::default().with_top_k(0)).is_err());
        assert!(search(&corpus(), "spice", &SearchConfig::default().with_top_k(0)).is_err());
        let engine = Engine::new(SearchConfig::default()).unwrap();
        assert!(engine.search_with_top_k(&corpus(), "spice", 0).is_err());
    }

    #[test]
    fn total_counts_matches_before_truncation() {
        let engine = Engine::new(SearchConfig::default()).unwrap();
        let c = Corpus::new(vec![
            Document::new("1", "Dune", "Herbert", "desert spice"),
            Document::new("2", "Messiah", "Herbert", "spice emperor"),
            Document::new("3", "Hobbit", "Tolkien", "dragon"),
        ]);
        let hits = engine.search_with_total(&c, "spice", 1).unwrap();
        assert_eq!(hits.total, 2);
        assert_eq!(hits.results.len(), 1);
        assert!(engine.search_with_total(&c, "spice", 0).is_err());
    }

    #[test]
    fn query_only_terms_do_not_match() {
        let engine = Engine::new(SearchConfig::default()).unwrap();
        assert!(engine.search(&corpus(), "wizard").is_empty());
    }
}
