//! Search configuration and its validation.

use crate::error::{Error, Result};
use crate::stopwords::StopwordSet;

/// Number of results returned when the caller does not choose.
pub const DEFAULT_TOP_K: usize = 5;

/// Scores must be strictly greater than this to surface.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.0;

/// How raw text becomes terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub stopwords: StopwordSet,
    /// Tokens shorter than this many characters are dropped.
    pub min_token_len: usize,
    /// Reduce terms to their English Snowball stem.
    pub stem: bool,
    /// NFKC-normalize before lowercasing.
    pub nfkc: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self { stopwords: StopwordSet::English, min_token_len: 1, stem: false, nfkc: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub tokenizer: TokenizerOptions,
    pub top_k: usize,
    pub score_threshold: f64,
    /// Tokenize and vectorize documents on the rayon pool. Results are identical either way.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerOptions::default(),
            top_k: DEFAULT_TOP_K,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.tokenizer.stopwords = stopwords;
        self
    }

    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.tokenizer.min_token_len = len;
        self
    }

    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.tokenizer.stem = stem;
        self
    }

    pub fn with_nfkc(mut self, nfkc: bool) -> Self {
        self.tokenizer.nfkc = nfkc;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_top_k(self.top_k)?;
        if !self.score_threshold.is_finite() || !(0.0..1.0).contains(&self.score_threshold) {
            return Err(Error::InvalidThreshold(self.score_threshold));
        }
        if self.tokenizer.min_token_len == 0 {
            return Err(Error::InvalidTokenLength);
        }
        self.tokenizer.stopwords.validate()
    }
}

pub(crate) fn validate_top_k(top_k: usize) -> Result<()> {
    if top_k == 0 {
        return Err(Error::InvalidTopK(top_k));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.score_threshold, 0.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = SearchConfig::default().with_top_k(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidTopK(0)));
        assert!(err.is_configuration());
    }

    #[test]
    fn threshold_must_be_finite_and_below_one() {
        for bad in [f64::NAN, f64::INFINITY, -0.1, 1.0] {
            let cfg = SearchConfig::default().with_score_threshold(bad);
            assert!(matches!(cfg.validate(), Err(Error::InvalidThreshold(_))), "{bad}");
        }
        assert!(SearchConfig::default().with_score_threshold(0.25).validate().is_ok());
    }

    #[test]
    fn zero_min_token_len_is_rejected() {
        let cfg = SearchConfig::default().with_min_token_len(0);
        assert!(matches!(cfg.validate(), Err(Error::InvalidTokenLength)));
    }
}
