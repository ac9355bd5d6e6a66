use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use ragcore::config::{LoaderConfig, DEFAULT_TOP_K, MAX_TOP_K};
use ragcore::tokenizer::Tokenizer;
use ragcore::{load_documents, search, Index, IndexStats, RagError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<SearchResult>,
}

/// Where the corpus lives and how it is read; reused on every reload.
#[derive(Clone, Debug)]
pub struct CorpusSource {
    pub dir: PathBuf,
    pub loader: LoaderConfig,
    pub tokenizer: Tokenizer,
}

impl CorpusSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into(), loader: LoaderConfig::default(), tokenizer: Tokenizer::default() }
    }

    pub fn build_index(&self) -> ragcore::Result<Index> {
        let documents = load_documents(&self.dir, &self.loader)?;
        Ok(Index::build_with(documents, self.tokenizer.clone()))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<CorpusSource>,
    /// Live index. Readers clone the inner `Arc`; a reload swaps it whole.
    pub index: Arc<RwLock<Arc<Index>>>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn snapshot(&self) -> Arc<Index> {
        self.index.read().clone()
    }
}

pub fn build_app(source: CorpusSource) -> Result<Router> {
    // Build the index at startup
    let index = source.build_index()?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState {
        source: Arc::new(source),
        index: Arc::new(RwLock::new(Arc::new(index))),
        admin_token,
    };
    Ok(router(app_state))
}

pub fn router(app_state: AppState) -> Router {
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
        .route("/stats", get(stats_handler))
        .route("/doc/*doc_id", get(doc_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let index = state.snapshot();
    let results = search(&index, &params.q, params.k.min(MAX_TOP_K));
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), results })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.snapshot().stats())
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let index = state.snapshot();
    match index.document(&doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "source": doc.source,
            "text": doc.content,
        }))),
        None => Err((StatusCode::NOT_FOUND, format!("document not found: {doc_id}"))),
    }
}

/// Rebuild the index from the corpus directory and swap it in.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IndexStats>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let source = state.source.clone();
    let fresh = tokio::task::spawn_blocking(move || source.build_index())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (error_status(&e), e.to_string()))?;
    let stats = fresh.stats();
    *state.index.write() = Arc::new(fresh);
    tracing::info!(num_docs = stats.num_docs, "index reloaded");
    Ok(Json(stats))
}

fn error_status(err: &RagError) -> StatusCode {
    match err {
        RagError::NotFound(_) | RagError::EmptyCorpus(_) | RagError::InvalidArgument(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RagError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
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
