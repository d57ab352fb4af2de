use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use search_core::{DocId, IndexStats, SearchHit, SearchIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    /// A missing `q` is treated as an empty query.
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: DocId,
    pub external_id: String,
    pub title: String,
    pub num_terms: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: IndexStats,
    pub built_at: String,
}

/// Shared, read-only engine. The index is fully built before the router exists.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SearchIndex>,
    pub built_at: String,
}

/// Build the HTTP router around a finished index.
pub fn build_app(index: SearchIndex) -> Router {
    let built_at = time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    let app_state = AppState { index: Arc::new(index), built_at };

    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Origins listed in a comma-separated `CORS_ALLOW_ORIGIN` value; unparsable entries are skipped.
fn allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Any origin unless `allow_origin` names at least one valid origin.
fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allow_origin.map(allowed_origins) {
        Some(origins) if !origins.is_empty() => base.allow_origin(AllowOrigin::list(origins)),
        _ => base.allow_origin(Any),
    }
}

/// Crawl `input_dir` and build the router over the resulting index.
pub fn build_app_from_dir(input_dir: &std::path::Path) -> Result<Router> {
    let index = search_crawler::index_directory(input_dir)?;
    Ok(build_app(index))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let mut results = state.index.query(&params.q);
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    tracing::debug!(query = params.q.as_str(), total_hits, "search served");
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<DocResponse>, (StatusCode, String)> {
    let doc = state
        .index
        .document(doc_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("document {doc_id} not found")))?;
    Ok(Json(DocResponse {
        doc_id,
        external_id: doc.external_id.clone(),
        title: doc.title.clone(),
        num_terms: doc.num_terms(),
    }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { stats: state.index.stats(), built_at: state.built_at.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_and_trimmed() {
        let origins = allowed_origins(" https://a.example , ,https://b.example");
        assert_eq!(origins, vec![
            HeaderValue::from_static("https://a.example"),
            HeaderValue::from_static("https://b.example"),
        ]);
        assert!(allowed_origins("").is_empty());
    }

    #[test]
    fn missing_query_param_defaults_to_empty() {
        let params: SearchParams = params_from("k=3");
        assert_eq!(params.q, "");
        assert_eq!(params.k, 3);
    }

    fn params_from(query: &str) -> SearchParams {
        let uri: axum::http::Uri = format!("/search?{query}").parse().unwrap();
        Query::<SearchParams>::try_from_uri(&uri).unwrap().0
    }
}
