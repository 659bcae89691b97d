//! trendsfeed-prep library - artifact generation
//!
//! Reads a spreadsheet, ranks articles by keyword frequency and writes the
//! tag and article artifacts served by trendsfeed-api.

use std::path::PathBuf;

use trendsfeed_common::artifacts::write_artifacts;
use trendsfeed_common::config::IngestConfig;
use trendsfeed_common::pipeline::{self, Artifacts};
use trendsfeed_common::{PipelineOptions, PipelineSummary, Result};

pub mod ingest;

/// Everything needed for one preparation run
#[derive(Debug, Clone)]
pub struct PrepPlan {
    pub input: PathBuf,
    pub ingest: IngestConfig,
    pub options: PipelineOptions,
    pub tags_out: PathBuf,
    pub articles_out: PathBuf,
}

/// Read input and rank it without touching the filesystem outputs
pub fn build_artifacts(plan: &PrepPlan) -> Result<(Artifacts, PipelineSummary)> {
    let records = ingest::read_records(&plan.input, &plan.ingest, &plan.options.keyword_field)?;
    Ok(pipeline::run(&records, &plan.options))
}

/// Read, rank and write both artifacts
pub fn execute(plan: &PrepPlan) -> Result<PipelineSummary> {
    let (artifacts, summary) = build_artifacts(plan)?;
    write_artifacts(&artifacts, &plan.tags_out, &plan.articles_out)?;
    Ok(summary)
}
