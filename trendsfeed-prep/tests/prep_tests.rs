//! Integration tests for trendsfeed-prep
//!
//! Tests cover:
//! - CSV input end to end (forward-fill, blank rows, ranking, artifacts on disk)
//! - Re-ranking an existing article JSON artifact
//! - Keyword field name as a parameter
//! - Missing input surfaces DataUnavailable
//! - Whitespace-only keyword cells and wrongly typed ids

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;
use trendsfeed_common::artifacts::{read_articles, read_tags};
use trendsfeed_common::config::IngestConfig;
use trendsfeed_common::{Error, PipelineOptions, TagSelection};
use trendsfeed_prep::{build_artifacts, execute, PrepPlan};

const FEED_CSV: &str = "\
Verb Phrase,Article Title,Summary,Overview,Article Link
Launches,Rocket lab flies,s1,o1,https://a/1
,Second launch,s2,o2,https://a/2
Acquires,Big merger,s3,o3,https://a/3
,,,,
Launches,Third launch,s4,o4,https://a/4
Partners,Joint venture,s5,o5,https://a/5
";

fn plan(dir: &Path, input: &str, options: PipelineOptions) -> PrepPlan {
    PrepPlan {
        input: dir.join(input),
        ingest: IngestConfig::default(),
        options,
        tags_out: dir.join("tags.json"),
        articles_out: dir.join("data.json"),
    }
}

#[test]
fn test_csv_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.csv"), FEED_CSV).unwrap();

    let summary = execute(&plan(dir.path(), "feed.csv", PipelineOptions::default())).unwrap();
    assert_eq!(summary.input_records, 5);
    assert_eq!(summary.selected_keywords, 3);
    assert_eq!(summary.retained_articles, 5);

    let tags = read_tags(&dir.path().join("tags.json")).unwrap();
    let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Launches", "Acquires", "Partners"]);

    let articles = read_articles(&dir.path().join("data.json")).unwrap();
    let titles: Vec<&str> = articles.iter().filter_map(|a| a.get_str("ArticleTitle")).collect();
    assert_eq!(
        titles,
        vec!["Rocket lab flies", "Second launch", "Third launch", "Big merger", "Joint venture"]
    );
    let ids: Vec<u64> = articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_article_artifact_field_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.csv"), FEED_CSV).unwrap();
    execute(&plan(dir.path(), "feed.csv", PipelineOptions::default())).unwrap();

    let text = fs::read_to_string(dir.path().join("data.json")).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["id", "Verb Phrase", "ArticleTitle", "Summary", "Overview", "Article Link"]
    );
    assert!(text.starts_with("[\n  {\n    \"id\": 1,"));
}

#[test]
fn test_top_k_limits_tags_and_articles() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.csv"), FEED_CSV).unwrap();

    let options = PipelineOptions::new("Verb Phrase", TagSelection::TopK(1));
    let (artifacts, _) = build_artifacts(&plan(dir.path(), "feed.csv", options)).unwrap();

    assert_eq!(artifacts.tags.len(), 1);
    assert_eq!(artifacts.articles.len(), 3);
    assert!(artifacts
        .articles
        .iter()
        .all(|a| a.keyword("Verb Phrase") == Some("Launches")));
}

#[test]
fn test_rerank_json_artifact_with_other_keyword_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("input.json"),
        r#"[
  {"id": 10, "Keywords": "b", "ArticleTitle": "b1"},
  {"id": 11, "Keywords": "a", "ArticleTitle": "a1"},
  {"id": 12, "Keywords": "a", "ArticleTitle": "a2"},
  {"id": 13, "Keywords": 5, "ArticleTitle": "bad type"}
]"#,
    )
    .unwrap();

    let options = PipelineOptions::new("Keywords", TagSelection::Unlimited);
    let (artifacts, summary) = build_artifacts(&plan(dir.path(), "input.json", options)).unwrap();

    assert_eq!(summary.input_records, 4);
    assert_eq!(summary.keyword_records, 3);
    let titles: Vec<&str> = artifacts
        .articles
        .iter()
        .filter_map(|a| a.get_str("ArticleTitle"))
        .collect();
    assert_eq!(titles, vec!["a1", "a2", "b1"]);
    assert_eq!(artifacts.articles[0].id, 1);
}

#[test]
fn test_missing_input_is_data_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = execute(&plan(dir.path(), "absent.csv", PipelineOptions::default())).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }));
    assert!(!dir.path().join("tags.json").exists());
}

#[test]
fn test_whitespace_keyword_cell_is_not_forward_filled() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("feed.csv"),
        "\
Verb Phrase,Article Title,Summary,Overview,Article Link
Launches,T1,s1,o1,https://a/1
   ,T2,s2,o2,https://a/2
",
    )
    .unwrap();

    let (artifacts, summary) =
        build_artifacts(&plan(dir.path(), "feed.csv", PipelineOptions::default())).unwrap();
    assert_eq!(summary.input_records, 2);
    let titles: Vec<&str> = artifacts
        .articles
        .iter()
        .filter_map(|a| a.get_str("ArticleTitle"))
        .collect();
    assert_eq!(titles, vec!["T1"]);
}

#[test]
fn test_wrongly_typed_ids_in_json_input() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("input.json"),
        r#"[
  {"id": "10", "Verb Phrase": "a", "ArticleTitle": "a1"},
  {"id": null, "Verb Phrase": "b", "ArticleTitle": "b1"},
  {"id": 1.0, "Verb Phrase": "a", "ArticleTitle": "a2"},
  {"Verb Phrase": "a", "ArticleTitle": "a3"}
]"#,
    )
    .unwrap();

    let (artifacts, summary) =
        build_artifacts(&plan(dir.path(), "input.json", PipelineOptions::default())).unwrap();
    assert_eq!(summary.input_records, 4);
    let ids: Vec<u64> = artifacts.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    let titles: Vec<&str> = artifacts
        .articles
        .iter()
        .filter_map(|a| a.get_str("ArticleTitle"))
        .collect();
    assert_eq!(titles, vec!["a1", "a2", "a3", "b1"]);
}
