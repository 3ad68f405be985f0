use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use gamesearch_core::{Document, EngineConfig, SearchEngine, SearchHit, SearchParams, SearchStatus};
use gamesearch_loader::load_corpus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub k: Option<usize>,
    pub floor: Option<f64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub status: SearchStatus,
    pub k: usize,
    pub precision_at_k: f64,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct DocResponse<'a> {
    pub doc_id: u32,
    #[serde(flatten)]
    pub document: &'a Document,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (status, Json(ErrorBody { error: error.to_string() })).into_response()
}

/// One engine, built before the router exists, shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Load the corpus, build the engine and wire the routes.
pub fn build_app(corpus: &str, config: EngineConfig) -> Result<Router> {
    let docs = load_corpus(corpus).with_context(|| format!("loading corpus from {corpus}"))?;
    let engine = SearchEngine::build(docs, config).context("building search engine")?;
    Ok(router(Arc::new(engine)))
}

pub fn router(engine: Arc<SearchEngine>) -> Router {
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
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchQuery>) -> Response {
    let start = std::time::Instant::now();
    let outcome = match (params.k, params.floor) {
        (None, None) => state.engine.search_default(&params.q),
        (k, floor) => {
            let defaults = state.engine.default_params();
            let search_params = SearchParams::new(k.unwrap_or(defaults.k), floor.unwrap_or(defaults.similarity_floor));
            state.engine.search(&params.q, search_params)
        }
    };
    match outcome {
        Ok(report) => {
            let elapsed = start.elapsed();
            tracing::debug!(query = %report.query, hits = report.results.len(), took_ms = elapsed.as_millis() as u64, "search served");
            Json(SearchResponse {
                query: report.query,
                took_ms: elapsed.as_millis(),
                status: report.status,
                k: report.k,
                precision_at_k: report.precision_at_k,
                results: report.results,
            })
            .into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<u32>) -> Response {
    match state.engine.document(doc_id) {
        Some(document) => Json(DocResponse { doc_id, document }).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "not found"),
    }
}
