//! TF-IDF ranking over a caller-supplied corpus.
//!
//! Every call to [`search`] (or [`Engine::search`]) tokenizes the corpus and
//! the query, builds a fresh vocabulary, weights both sides with smoothed
//! TF-IDF and ranks documents by cosine similarity. Nothing is kept between
//! calls.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod ranker;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;
pub mod vocabulary;

pub use config::{SearchConfig, TokenizerOptions, DEFAULT_TOP_K};
pub use engine::{search, Engine, Hits};
pub use error::{Error, Result};
pub use index::{Corpus, Document, ScoredResult, TermId};
pub use stopwords::StopwordSet;
