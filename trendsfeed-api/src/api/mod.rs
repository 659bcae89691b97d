//! HTTP API handlers for trendsfeed-api

pub mod buildinfo;
pub mod catalog;
pub mod health;
pub mod home;

pub use buildinfo::{get_build_info, BuildInfo};
pub use catalog::{get_all_articles, get_articles_by_tag, get_articles_by_tag_id, get_tags};
pub use health::health_routes;
pub use home::home;
