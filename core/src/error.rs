use std::path::PathBuf;

/// Errors raised by configuration validation and corpus loading.
///
/// Degenerate search inputs (blank query, empty corpus, no match) are not
/// errors; they yield an empty result list.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("top_k must be a positive integer, got {0}")]
    InvalidTopK(usize),
    #[error("score threshold must be finite and in [0, 1), got {0}")]
    InvalidThreshold(f64),
    #[error("min_token_len must be at least 1")]
    InvalidTokenLength,
    #[error("invalid stopword {0:?}: stopwords must be non-empty and alphanumeric")]
    InvalidStopword(String),
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed csv in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported corpus format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl Error {
    /// True for errors caused by the search configuration rather than the corpus source.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidTopK(_)
                | Error::InvalidThreshold(_)
                | Error::InvalidTokenLength
                | Error::InvalidStopword(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
