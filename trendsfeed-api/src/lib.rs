//! trendsfeed-api library - read-only catalog server
//!
//! Serves the tag and article artifacts from an immutable in-memory snapshot.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use trendsfeed_common::CatalogSnapshot;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog loaded at startup; never mutated afterwards
    pub catalog: Arc<CatalogSnapshot>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: CatalogSnapshot) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::home))
        .route("/tags", get(api::get_tags))
        .route("/data", get(api::get_all_articles))
        .route("/tag/:tag_name", get(api::get_articles_by_tag))
        .route("/tag/id/:tag_id", get(api::get_articles_by_tag_id))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        // Browser frontends fetch the catalog cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
