use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shelfsearch_core::loader::load_corpus;
use shelfsearch_core::tokenizer::tokenize;
use shelfsearch_core::vocabulary::Vocabulary;
use shelfsearch_core::{Engine, ScoredResult, SearchConfig, StopwordSet, TokenizerOptions, DEFAULT_TOP_K};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shelfsearch")]
#[command(about = "Rank a book corpus against a query with TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a corpus file or directory
    Search {
        /// Corpus path (.csv, .json, .jsonl, or a directory of them)
        #[arg(long)]
        corpus: PathBuf,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Only show results scoring above this
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,
        /// `english`, `none`, or a file with one stopword per line
        #[arg(long, default_value = "english")]
        stopwords: String,
        /// Stem terms before matching
        #[arg(long, default_value_t = false)]
        stem: bool,
        /// Vectorize documents across threads
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        query: String,
    },
    /// Print corpus and vocabulary statistics
    Stats {
        #[arg(long)]
        corpus: PathBuf,
        /// How many of the most widespread terms to list
        #[arg(long, default_value_t = 10)]
        top_terms: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, top_k, threshold, stopwords, stem, parallel, json, query } => {
            let config = SearchConfig::default()
                .with_top_k(top_k)
                .with_score_threshold(threshold)
                .with_stopwords(parse_stopwords(&stopwords)?)
                .with_stemming(stem)
                .with_parallel(parallel);
            run_search(&corpus, config, &query, json)
        }
        Commands::Stats { corpus, top_terms } => print_stats(&corpus, top_terms),
    }
}

fn parse_stopwords(arg: &str) -> Result<StopwordSet> {
    match arg {
        "english" => Ok(StopwordSet::English),
        "none" => Ok(StopwordSet::None),
        path => {
            let text = fs::read_to_string(path).with_context(|| format!("reading stopword file {path}"))?;
            Ok(StopwordSet::custom(text.lines().filter(|l| !l.trim().is_empty())))
        }
    }
}

fn run_search(corpus_path: &Path, config: SearchConfig, query: &str, json: bool) -> Result<()> {
    let engine = Engine::new(config)?;
    if query.trim().is_empty() {
        println!("no query");
        return Ok(());
    }
    let corpus = load_corpus(corpus_path)?;
    let results = engine.search(&corpus, query);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render(&results);
    }
    Ok(())
}

fn render(results: &[ScoredResult<'_>]) {
    if results.is_empty() {
        println!("no results");
        return;
    }
    for (rank, r) in results.iter().enumerate() {
        println!("{}. {} ({:.4})", rank + 1, r.document.title, r.score);
        if !r.document.author.is_empty() {
            println!("   by {}", r.document.author);
        }
        println!("   {}", r.document.content);
    }
}

fn print_stats(corpus_path: &Path, top_terms: usize) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;
    let opts = TokenizerOptions::default();
    let tokenized: Vec<Vec<String>> = corpus.iter().map(|d| tokenize(&d.content, &opts)).collect();
    let vocabulary = Vocabulary::build(&tokenized, &[] as &[&str]);
    tracing::info!(docs = corpus.len(), terms = vocabulary.len(), "computed stats");

    println!("documents: {}", corpus.len());
    println!("vocabulary: {}", vocabulary.len());
    let mut by_df: Vec<(&str, u32)> = vocabulary
        .terms()
        .iter()
        .zip(vocabulary.document_frequencies())
        .map(|(t, &df)| (t.as_str(), df))
        .collect();
    by_df.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (term, df) in by_df.into_iter().take(top_terms) {
        println!("{df:>6}  {term}");
    }
    Ok(())
}
