//! trendsfeed-prep - Build tag and article artifacts from a spreadsheet
//!
//! Settings priority: command-line flags > environment > TOML config > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendsfeed_common::config::{log_config_source, TomlConfig};
use trendsfeed_common::TagSelection;
use trendsfeed_prep::PrepPlan;

/// Command-line arguments for trendsfeed-prep
#[derive(Parser, Debug)]
#[command(name = "trendsfeed-prep")]
#[command(about = "Rank spreadsheet articles by keyword frequency and write JSON artifacts")]
#[command(version)]
struct Args {
    /// Spreadsheet (xlsx, xls, ods, csv) or article JSON to read
    #[arg(short, long, env = "TRENDSFEED_INPUT")]
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "TRENDSFEED_CONFIG")]
    config: Option<PathBuf>,

    /// Worksheet name (default: first worksheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Keyword column / field name
    #[arg(short, long, env = "TRENDSFEED_KEYWORD_FIELD")]
    keyword_field: Option<String>,

    /// Number of keywords to keep
    #[arg(long, conflicts_with = "unlimited")]
    top_k: Option<usize>,

    /// Keep every distinct keyword
    #[arg(long)]
    unlimited: bool,

    /// Tag artifact output path
    #[arg(long)]
    tags_out: Option<PathBuf>,

    /// Article artifact output path
    #[arg(long)]
    articles_out: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = TomlConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;

    let level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("trendsfeed_prep={0},trendsfeed_common={0}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting trendsfeed-prep v{}", env!("CARGO_PKG_VERSION"));
    log_config_source(source.as_deref());

    let mut ingest = config.ingest.clone();
    if args.sheet.is_some() {
        ingest.sheet = args.sheet.clone();
    }

    let mut options = config.pipeline.to_options();
    if let Some(field) = args.keyword_field {
        options.keyword_field = field;
    }
    if args.unlimited {
        options.selection = TagSelection::Unlimited;
    } else if let Some(k) = args.top_k {
        anyhow::ensure!(k > 0, "--top-k must be at least 1");
        options.selection = TagSelection::TopK(k);
    }

    let plan = PrepPlan {
        input: args.input,
        ingest,
        options,
        tags_out: args.tags_out.unwrap_or(config.data.tags_path),
        articles_out: args.articles_out.unwrap_or(config.data.articles_path),
    };

    info!(
        "Input: {} (keyword field '{}', selection {:?})",
        plan.input.display(),
        plan.options.keyword_field,
        plan.options.selection
    );

    let summary = trendsfeed_prep::execute(&plan)
        .with_context(|| format!("Failed to prepare artifacts from {}", plan.input.display()))?;

    info!(
        "✓ {} tags, {} articles ({} input rows)",
        summary.selected_keywords, summary.retained_articles, summary.input_records
    );
    Ok(())
}
