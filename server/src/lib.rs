use anyhow::{bail, Context, Result};
use axum::{extract::{Query, State}, http::StatusCode, routing::get, Json, Router};
use sentrank_core::{CoOccurrenceMethod, CorpusIndex, CorpusStats, FillerWords, NgramOptions, RankOptions, RankedSentence, TokenCount};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RankParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    pub tfidf_weight: Option<f64>,
    pub char_weight: Option<f64>,
    pub filter_fillers: Option<bool>,
    pub co_occurrence_weight: Option<f64>,
    pub method: Option<CoOccurrenceMethod>,
}
fn default_k() -> usize { 10 }

impl RankParams {
    /// Scoring options for this request; absent fields keep their defaults.
    fn options(&self) -> RankOptions {
        let defaults = RankOptions::default();
        RankOptions {
            tfidf_weight: self.tfidf_weight.unwrap_or(defaults.tfidf_weight),
            char_weight: self.char_weight.unwrap_or(defaults.char_weight),
            filter_fillers: self.filter_fillers.unwrap_or(defaults.filter_fillers),
            co_occurrence_weight: self.co_occurrence_weight.unwrap_or(defaults.co_occurrence_weight),
            co_occurrence_method: self.method.unwrap_or(defaults.co_occurrence_method),
            // truncation happens after counting hits
            top_n: 0,
        }
    }
}

#[derive(Serialize)]
pub struct RankResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<RankedSentence>,
}

#[derive(Deserialize)]
pub struct NgramParams {
    pub q: String,
    #[serde(default)]
    pub n: Option<usize>,
    #[serde(default)]
    pub top: Option<usize>,
    #[serde(default)]
    pub context: Option<usize>,
    #[serde(default)]
    pub filter_fillers: bool,
}

#[derive(Serialize)]
pub struct NgramResponse {
    pub query: String,
    pub tokens: Vec<TokenCount>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<CorpusIndex>,
}

/// Build the index from a corpus file and an optional filler list, then the router.
pub fn build_app(corpus_path: &str, fillers_path: &str) -> Result<Router> {
    let text = std::fs::read_to_string(Path::new(corpus_path))
        .with_context(|| format!("reading corpus {corpus_path}"))?;
    if text.trim().is_empty() {
        bail!("corpus {corpus_path} is empty");
    }
    let fillers = FillerWords::load_or_empty(fillers_path);
    Ok(router(Arc::new(CorpusIndex::new(&text, fillers))))
}

pub fn router(index: Arc<CorpusIndex>) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/rank", get(rank_handler))
        .route("/ngrams", get(ngrams_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn rank_handler(State(state): State<AppState>, Query(params): Query<RankParams>) -> Result<Json<RankResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let index = Arc::clone(&state.index);
    let query = params.q.clone();
    let opts = params.options();
    // scoring is CPU bound
    let mut hits = tokio::task::spawn_blocking(move || index.rank_sentences(&query, &opts))
        .await
        .map_err(internal_error)?;
    let total_hits = hits.len();
    hits.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, took_s = elapsed.as_secs_f64(), "rank request");
    Ok(Json(RankResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results: hits }))
}

pub async fn ngrams_handler(State(state): State<AppState>, Query(params): Query<NgramParams>) -> Result<Json<NgramResponse>, (StatusCode, String)> {
    let defaults = NgramOptions::default();
    let opts = NgramOptions {
        n: params.n.unwrap_or(defaults.n),
        filter_fillers: params.filter_fillers,
        top_n: params.top.unwrap_or(defaults.top_n),
        context: params.context.unwrap_or(defaults.context),
    };
    let index = Arc::clone(&state.index);
    let query = params.q.clone();
    let tokens = tokio::task::spawn_blocking(move || index.find_most_common_tokens_from_query_ngrams(&query, &opts))
        .await
        .map_err(internal_error)?;
    Ok(Json(NgramResponse { query: params.q, tokens }))
}

fn internal_error(err: tokio::task::JoinError) -> (StatusCode, String) {
    tracing::error!(error = %err, "scoring task failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "scoring task failed".into())
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<CorpusStats> {
    Json(state.index.stats())
}
