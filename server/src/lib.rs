use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shelfsearch_core::loader::CachedCorpus;
use shelfsearch_core::{Engine, Error, SearchConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Defaults to the engine's configured `top_k`.
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    /// Matches before truncation to `k`.
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub score: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<CachedCorpus>,
    pub engine: Arc<Engine>,
    pub admin_token: Option<String>,
}

type ApiError = (StatusCode, String);

pub fn build_app(corpus_path: impl Into<PathBuf>) -> Result<Router> {
    build_app_with_config(corpus_path, SearchConfig::default())
}

pub fn build_app_with_config(corpus_path: impl Into<PathBuf>, config: SearchConfig) -> Result<Router> {
    let corpus = Arc::new(CachedCorpus::new(corpus_path.into()));
    // Load eagerly so a bad corpus path fails at startup
    let loaded = corpus.get()?;
    tracing::info!(docs = loaded.len(), path = %corpus.path().display(), "corpus ready");

    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState { corpus, engine: Arc::new(Engine::new(config)?), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:position", get(doc_handler))
        .route("/corpus/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

fn api_error(err: Error) -> ApiError {
    if err.is_configuration() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!(error = %err, "corpus unavailable");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    // Blank queries never reach the engine
    if params.q.trim().is_empty() {
        let elapsed = start.elapsed();
        return Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: 0, results: vec![] }));
    }

    let corpus = state.corpus.get().map_err(api_error)?;
    let k = params.k.unwrap_or(state.engine.config().top_k);
    let hits = state.engine.search_with_total(&corpus, &params.q, k).map_err(api_error)?;
    let total_hits = hits.total;
    let results: Vec<SearchHit> = hits
        .results
        .into_iter()
        .map(|r| SearchHit {
            position: r.position,
            id: r.document.id.clone(),
            title: r.document.title.clone(),
            author: r.document.author.clone(),
            content: r.document.content.clone(),
            score: r.score,
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, returned = results.len(), "search served");
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let corpus = state.corpus.get().map_err(api_error)?;
    match corpus.get(position) {
        Some(doc) => Ok(Json(serde_json::json!({
            "position": position,
            "id": doc.id,
            "title": doc.title,
            "author": doc.author,
            "content": doc.content,
        }))),
        None => Err((StatusCode::NOT_FOUND, "not found".into())),
    }
}

async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, ApiError> {
    authorize(&state, &headers)?;
    state.corpus.invalidate();
    let corpus = state.corpus.get().map_err(api_error)?;
    tracing::info!(docs = corpus.len(), "corpus reloaded on request");
    Ok(Json(serde_json::json!({ "documents": corpus.len() })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
