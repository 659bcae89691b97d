//! Catalog lookups
//!
//! - GET /tags: every tag
//! - GET /data: every article
//! - GET /tag/:tag_name: articles whose keyword matches, ignoring case
//! - GET /tag/id/:tag_id: resolve the tag id to its label, then as above
//!
//! The two filtered lookups answer 404 when nothing matches.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;
use trendsfeed_common::{ArticleRecord, TagRecord};

use crate::{ApiResult, AppState};

/// GET /tags
pub async fn get_tags(State(state): State<AppState>) -> Json<Vec<TagRecord>> {
    Json(state.catalog.tags().to_vec())
}

/// GET /data
pub async fn get_all_articles(State(state): State<AppState>) -> Json<Vec<ArticleRecord>> {
    Json(state.catalog.articles().to_vec())
}

/// GET /tag/:tag_name
pub async fn get_articles_by_tag(
    State(state): State<AppState>,
    Path(tag_name): Path<String>,
) -> ApiResult<Json<Vec<ArticleRecord>>> {
    let matches = state.catalog.articles_by_label(&tag_name)?;
    debug!("Tag '{}': {} articles", tag_name, matches.len());
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// GET /tag/id/:tag_id
pub async fn get_articles_by_tag_id(
    State(state): State<AppState>,
    Path(tag_id): Path<u64>,
) -> ApiResult<Json<Vec<ArticleRecord>>> {
    let matches = state.catalog.articles_by_tag_id(tag_id)?;
    debug!("Tag id {}: {} articles", tag_id, matches.len());
    Ok(Json(matches.into_iter().cloned().collect()))
}
