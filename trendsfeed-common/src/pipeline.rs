//! Keyword ranking pipeline
//!
//! One parameterised pipeline covers every dataset variant: the keyword field
//! name and the selection mode are the only knobs.
//!
//! records → [`FrequencyTable`] → ranked keywords → (tag registry, ranked articles)

use tracing::{debug, info};

use crate::keywords::{extract_keywords, TagSelection};
use crate::ranking::filter_and_rank;
use crate::records::{ArticleRecord, TagRecord};
use crate::tags::build_tag_registry;

/// Default keyword column / field name
pub const DEFAULT_KEYWORD_FIELD: &str = "Verb Phrase";

/// Pipeline parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Name of the field holding each article's keyword
    pub keyword_field: String,
    /// How many keywords survive selection
    pub selection: TagSelection,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            keyword_field: DEFAULT_KEYWORD_FIELD.to_string(),
            selection: TagSelection::default(),
        }
    }
}

impl PipelineOptions {
    pub fn new(keyword_field: impl Into<String>, selection: TagSelection) -> Self {
        Self {
            keyword_field: keyword_field.into(),
            selection,
        }
    }
}

/// The two output artifacts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    pub tags: Vec<TagRecord>,
    pub articles: Vec<ArticleRecord>,
}

/// Counts reported after a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Records handed to the pipeline
    pub input_records: usize,
    /// Records with a non-blank keyword
    pub keyword_records: usize,
    /// Distinct keywords before selection
    pub distinct_keywords: usize,
    /// Keywords kept by selection (tag count)
    pub selected_keywords: usize,
    /// Articles kept after filtering
    pub retained_articles: usize,
}

/// Run the full ranking pipeline over `records`
///
/// Pure and deterministic: the same input always yields the same artifacts.
pub fn run(records: &[ArticleRecord], options: &PipelineOptions) -> (Artifacts, PipelineSummary) {
    let field = options.keyword_field.as_str();
    let (table, selected) = extract_keywords(records, field, options.selection);

    for (rank, kw) in selected.iter().enumerate() {
        debug!("Rank {}: '{}' ({} articles)", rank + 1, kw.label, kw.count);
    }

    let tags = build_tag_registry(&selected);
    let articles = filter_and_rank(records, &selected, field);

    let summary = PipelineSummary {
        input_records: records.len(),
        keyword_records: table.total(),
        distinct_keywords: table.distinct(),
        selected_keywords: tags.len(),
        retained_articles: articles.len(),
    };

    info!(
        "Ranked '{}': {} records, {} with keyword, {} distinct, {} tags, {} articles kept",
        field,
        summary.input_records,
        summary.keyword_records,
        summary.distinct_keywords,
        summary.selected_keywords,
        summary.retained_articles
    );

    (Artifacts { tags, articles }, summary)
}
