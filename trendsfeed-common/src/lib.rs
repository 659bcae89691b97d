//! # Trendsfeed Common Library
//!
//! Shared code for the trendsfeed tools including:
//! - Article and tag record types
//! - Keyword frequency counting and top-K selection
//! - Article filtering and ranking by keyword frequency
//! - Artifact (JSON) reading and writing
//! - The immutable catalog snapshot served over HTTP
//! - Configuration loading

pub mod artifacts;
pub mod config;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod ranking;
pub mod records;
pub mod snapshot;
pub mod tags;

pub use error::{Error, Result};
pub use keywords::{FrequencyTable, TagSelection};
pub use pipeline::{Artifacts, PipelineOptions, PipelineSummary};
pub use records::{ArticleRecord, TagRecord};
pub use snapshot::{CatalogSnapshot, LoadMode};
