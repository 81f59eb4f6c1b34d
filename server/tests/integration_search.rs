use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use shelfsearch_core::SearchConfig;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_tiny_corpus(dir: &Path) -> std::path::PathBuf {
    let file = dir.join("books.jsonl");
    fs::write(
        &file,
        concat!(
            "{\"id\": \"dune\", \"title\": \"Dune\", \"author\": \"Herbert\", \"content\": \"desert planet spice empire\"}\n",
            "{\"id\": \"hobbit\", \"title\": \"Hobbit\", \"author\": \"Tolkien\", \"content\": \"mountain dragon journey\"}\n",
            "{\"id\": \"messiah\", \"title\": \"Dune Messiah\", \"author\": \"Herbert\", \"content\": \"spice empire emperor\"}\n",
        ),
    )
    .unwrap();
    file
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let (status, json) = call(app, get("/search?q=desert%20spice&k=2")).await;
    assert_eq!(status, StatusCode::OK);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["title"], "Dune");
    assert_eq!(arr[1]["title"], "Dune Messiah");
    assert!(arr[0]["score"].as_f64().unwrap() >= arr[1]["score"].as_f64().unwrap());
    assert!(arr.iter().all(|h| h["title"] != "Hobbit"));
}

#[tokio::test]
async fn total_hits_counts_before_k() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let (status, json) = call(app, get("/search?q=spice&k=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["total_hits"], 2);
}

#[tokio::test]
async fn configured_top_k_applies_without_k() {
    let dir = tempdir().unwrap();
    let config = SearchConfig::default().with_top_k(1);
    let app = server::build_app_with_config(write_tiny_corpus(dir.path()), config).unwrap();

    let (_, json) = call(app.clone(), get("/search?q=spice")).await;
    assert_eq!(json["results"].as_array().unwrap().len(), 1);

    let (_, json) = call(app, get("/search?q=spice&k=3")).await;
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[test]
fn invalid_config_fails_at_startup() {
    let dir = tempdir().unwrap();
    let config = SearchConfig::default().with_top_k(0);
    assert!(server::build_app_with_config(write_tiny_corpus(dir.path()), config).is_err());
}

#[tokio::test]
async fn blank_query_is_empty_not_error() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let (status, json) = call(app, get("/search?q=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn zero_k_is_bad_request() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let (status, _) = call(app, get("/search?q=spice&k=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn doc_lookup_by_position() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let (status, json) = call(app.clone(), get("/doc/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Hobbit");

    let (status, _) = call(app, get("/doc/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_requires_admin_token() {
    let dir = tempdir().unwrap();
    let app = server::build_app(write_tiny_corpus(dir.path())).unwrap();

    let req = Request::post("/corpus/reload").body(Body::empty()).unwrap();
    let (status, _) = call(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test]
fn missing_corpus_fails_at_startup() {
    let dir = tempdir().unwrap();
    assert!(server::build_app(dir.path().join("missing.jsonl")).is_err());
}
