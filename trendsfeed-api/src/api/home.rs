//! Root route

use axum::extract::State;

use crate::AppState;

/// GET /
///
/// Plain-text banner confirming the server is up
pub async fn home(State(state): State<AppState>) -> String {
    format!(
        "trendsfeed-api is running ({} tags, {} articles). Use /tags, /data, /tag/<tag_name> or /tag/id/<id>",
        state.catalog.tags().len(),
        state.catalog.articles().len()
    )
}
