//! Artifact file reading and writing
//!
//! Artifacts are pretty-printed JSON arrays (2-space indent, UTF-8 kept as-is).
//! Writes go to a sibling `.tmp` file first and are renamed into place so a
//! running server never observes a half-written artifact.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::pipeline::Artifacts;
use crate::records::{ArticleRecord, TagRecord};

/// Read a JSON array artifact, mapping every failure to `DataUnavailable`
fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path).map_err(|e| Error::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|e| Error::DataUnavailable {
        path: path.to_path_buf(),
        reason: format!("invalid JSON: {}", e),
    })
}

/// Read the tag artifact
pub fn read_tags(path: &Path) -> Result<Vec<TagRecord>> {
    read_array(path)
}

/// Read the article artifact
pub fn read_articles(path: &Path) -> Result<Vec<ArticleRecord>> {
    read_array(path)
}

/// Serialize a value the way artifacts are stored on disk
pub fn to_artifact_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Write `value` to `path` atomically (temp file + rename)
pub fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let text = to_artifact_json(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, text)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Write both artifacts
pub fn write_artifacts(artifacts: &Artifacts, tags_path: &Path, articles_path: &Path) -> Result<()> {
    write_json_atomic(&artifacts.tags, tags_path)?;
    info!("Wrote {} tags to {}", artifacts.tags.len(), tags_path.display());

    write_json_atomic(&artifacts.articles, articles_path)?;
    info!(
        "Wrote {} articles to {}",
        artifacts.articles.len(),
        articles_path.display()
    );
    Ok(())
}
