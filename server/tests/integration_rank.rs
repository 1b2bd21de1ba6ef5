use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

const CORPUS: &str = "The cat sat. The dog ran fast. Cats and dogs are friends.";

fn build_tiny_app(dir: &std::path::Path) -> Router {
    let corpus = dir.join("corpus.txt");
    let fillers = dir.join("fillers.json");
    fs::write(&corpus, CORPUS).unwrap();
    fs::write(&fillers, r#"["the", "and", "are"]"#).unwrap();
    sentrank_server::build_app(corpus.to_str().unwrap(), fillers.to_str().unwrap()).unwrap()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn rank_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let (status, body) = call(app, "/rank?q=cat&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"].as_u64().unwrap(), 3);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["sentence"], "The cat sat");
    assert_eq!(arr[1]["sentence"], "Cats and dogs are friends");
    assert!(arr[0]["score"].as_f64().unwrap() >= arr[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn rank_accepts_scoring_overrides() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let (status, body) = call(app, "/rank?q=dogs&filter_fillers=true&co_occurrence_weight=0.5&method=pmi").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    for hit in json["results"].as_array().unwrap() {
        let score = hit["score"].as_f64().unwrap();
        assert!(score > 0.0 && score <= 1.0 + 1e-9);
    }
}

#[tokio::test]
async fn empty_query_has_no_hits() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let (status, body) = call(app, "/rank?q=").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 0);
}

#[tokio::test]
async fn stats_report_fillers() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let (status, body) = call(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["sentence_count"], 3);
    assert_eq!(json["filler_word_count"], 3);
    assert_eq!(json["filtered_token_count"], 8);
}

#[tokio::test]
async fn ngrams_with_context() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let (status, body) = call(app, "/ngrams?q=dog%20ran&context=1").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let tokens: Vec<&str> = json["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["token"].as_str().unwrap())
        .collect();
    assert_eq!(tokens, vec!["fast", "the"]);
}

#[test]
fn missing_fillers_do_not_prevent_startup() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");
    fs::write(&corpus, CORPUS).unwrap();
    let missing = dir.path().join("absent.json");
    assert!(sentrank_server::build_app(corpus.to_str().unwrap(), missing.to_str().unwrap()).is_ok());
}

#[test]
fn empty_corpus_is_rejected() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");
    fs::write(&corpus, "  \n").unwrap();
    assert!(sentrank_server::build_app(corpus.to_str().unwrap(), "none.json").is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_rank_requests_agree() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let calls = (0..8).map(|_| call(app.clone(), "/rank?q=cat%20unicorn&k=3"));
    let responses = spawn_all(calls).await;
    let first: Value = serde_json::from_slice(&responses[0].1).unwrap();
    for (status, body) in &responses {
        assert_eq!(*status, StatusCode::OK);
        let json: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["results"], first["results"]);
    }
}

#[tokio::test]
async fn ngrams_with_huge_context_does_not_fail() {
    let dir = tempdir().unwrap();
    let app = build_tiny_app(dir.path());

    let uri = format!("/ngrams?q=dog%20ran&context={}", usize::MAX);
    let (status, body) = call(app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(!json["tokens"].as_array().unwrap().is_empty());
}

async fn spawn_all<F>(calls: impl Iterator<Item = F>) -> Vec<(StatusCode, Bytes)>
where
    F: std::future::Future<Output = (StatusCode, Bytes)> + Send + 'static,
{
    let handles: Vec<_> = calls.map(tokio::spawn).collect();
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await.unwrap());
    }
    out
}
