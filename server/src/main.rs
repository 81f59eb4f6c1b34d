use anyhow::Result;
use clap::Parser;
use server::build_app_with_config;
use shelfsearch_core::{SearchConfig, DEFAULT_TOP_K};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus file or directory (.csv / .json / .jsonl)
    #[arg(long, default_value = "./books.csv")]
    corpus: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Results per query when the request has no `k`
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// Only return results scoring above this
    #[arg(long, default_value_t = 0.0)]
    threshold: f64,
    /// Stem terms before matching
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Vectorize documents across threads
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_top_k(self.top_k)
            .with_score_threshold(self.threshold)
            .with_stemming(self.stem)
            .with_parallel(self.parallel)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app = build_app_with_config(args.corpus.clone(), args.search_config())?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, top_k = args.top_k, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
