//! Health check endpoint
//!
//! Reports on the loaded catalog, so a server started in degrade-to-empty
//! mode after its artifacts failed to load is visible from outside.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the catalog is standing in empty
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub keyword_field: String,
    pub tags: usize,
    pub articles: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = &state.catalog;
    Json(HealthResponse {
        status: if catalog.is_degraded() { "degraded" } else { "ok" },
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        keyword_field: catalog.keyword_field().to_string(),
        tags: catalog.tags().len(),
        articles: catalog.articles().len(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
