//! Immutable in-memory catalog served by the API
//!
//! Built once at startup from the tag and article artifacts, then shared
//! read-only (behind `Arc`) with every request handler. Picking up new
//! artifacts means building a new snapshot, i.e. restarting the server.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::artifacts::{read_articles, read_tags};
use crate::error::{Error, Result};
use crate::records::{ArticleRecord, TagRecord};

/// Behaviour when an artifact cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// Refuse to start: surface `Error::DataUnavailable`
    #[default]
    FailFast,
    /// Log a warning and serve empty collections
    DegradeToEmpty,
}

/// Read-only view over the two artifacts
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    tags: Vec<TagRecord>,
    articles: Vec<ArticleRecord>,
    keyword_field: String,
    id_to_label: HashMap<u64, String>,
    degraded: bool,
}

/// Case-insensitive comparison key for keyword labels
fn fold(label: &str) -> String {
    label.trim().to_lowercase()
}

impl CatalogSnapshot {
    /// Build a snapshot from already-loaded records
    pub fn new(tags: Vec<TagRecord>, articles: Vec<ArticleRecord>, keyword_field: impl Into<String>) -> Self {
        let id_to_label = tags.iter().map(|t| (t.id, t.label.clone())).collect();
        Self {
            tags,
            articles,
            keyword_field: keyword_field.into(),
            id_to_label,
            degraded: false,
        }
    }

    /// Snapshot with no tags and no articles
    pub fn empty(keyword_field: impl Into<String>) -> Self {
        Self::new(Vec::new(), Vec::new(), keyword_field)
    }

    /// Load both artifacts from disk
    ///
    /// In [`LoadMode::FailFast`] any read or parse failure is returned as
    /// `Error::DataUnavailable`. In [`LoadMode::DegradeToEmpty`] the failure is
    /// logged and an empty snapshot is returned instead.
    pub fn load(
        tags_path: &Path,
        articles_path: &Path,
        keyword_field: &str,
        mode: LoadMode,
    ) -> Result<Self> {
        let loaded = read_tags(tags_path)
            .and_then(|tags| read_articles(articles_path).map(|articles| (tags, articles)));

        match loaded {
            Ok((tags, articles)) => {
                info!(
                    "Loaded {} tags from {} and {} articles from {}",
                    tags.len(),
                    tags_path.display(),
                    articles.len(),
                    articles_path.display()
                );
                Ok(Self::new(tags, articles, keyword_field))
            }
            Err(e) => match mode {
                LoadMode::FailFast => Err(e),
                LoadMode::DegradeToEmpty => {
                    warn!("{}; serving empty catalog (load_mode = degrade-to-empty)", e);
                    Ok(Self {
                        degraded: true,
                        ..Self::empty(keyword_field)
                    })
                }
            },
        }
    }

    /// True when the artifacts failed to load and this snapshot stands in empty
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// All tags in artifact order
    pub fn tags(&self) -> &[TagRecord] {
        &self.tags
    }

    /// All articles in artifact order
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    pub fn keyword_field(&self) -> &str {
        &self.keyword_field
    }

    /// Label registered for a tag identifier
    pub fn tag_label(&self, id: u64) -> Option<&str> {
        self.id_to_label.get(&id).map(String::as_str)
    }

    /// Articles whose keyword equals `label`, ignoring case
    ///
    /// Zero matches is reported as `Error::NotFound`.
    pub fn articles_by_label(&self, label: &str) -> Result<Vec<&ArticleRecord>> {
        let wanted = fold(label);
        let matches: Vec<&ArticleRecord> = self
            .articles
            .iter()
            .filter(|a| fold(a.keyword_raw(&self.keyword_field)) == wanted)
            .collect();

        if matches.is_empty() {
            return Err(Error::NotFound(format!(
                "No articles found for tag '{}'",
                label
            )));
        }
        Ok(matches)
    }

    /// Articles for the tag with identifier `id`
    pub fn articles_by_tag_id(&self, id: u64) -> Result<Vec<&ArticleRecord>> {
        let label = self
            .tag_label(id)
            .ok_or_else(|| Error::NotFound(format!("No tag found with ID {}", id)))?;
        self.articles_by_label(label)
    }
}
