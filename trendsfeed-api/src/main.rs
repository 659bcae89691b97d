//! trendsfeed-api - Read-only catalog server
//!
//! Loads the tag and article artifacts once at startup and serves them over
//! HTTP until shut down. New artifacts are picked up by restarting.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendsfeed_api::api::BuildInfo;
use trendsfeed_api::{build_router, AppState};
use trendsfeed_common::config::{log_config_source, TomlConfig};
use trendsfeed_common::{CatalogSnapshot, LoadMode};

/// Command-line arguments for trendsfeed-api
#[derive(Parser, Debug)]
#[command(name = "trendsfeed-api")]
#[command(about = "Serve keyword-ranked article artifacts over HTTP")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "TRENDSFEED_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "TRENDSFEED_HOST")]
    host: Option<String>,

    /// Port to listen on (falls back to PORT, then the config file)
    #[arg(short, long, env = "TRENDSFEED_PORT")]
    port: Option<u16>,

    /// Tag artifact
    #[arg(long, env = "TRENDSFEED_TAGS")]
    tags: Option<PathBuf>,

    /// Article artifact
    #[arg(long, env = "TRENDSFEED_ARTICLES")]
    articles: Option<PathBuf>,

    /// Keyword field used for tag lookups
    #[arg(short, long, env = "TRENDSFEED_KEYWORD_FIELD")]
    keyword_field: Option<String>,

    /// Behaviour when an artifact cannot be loaded
    #[arg(long, value_parser = parse_load_mode)]
    load_mode: Option<LoadMode>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_load_mode(s: &str) -> std::result::Result<LoadMode, String> {
    match s {
        "fail-fast" => Ok(LoadMode::FailFast),
        "degrade-to-empty" => Ok(LoadMode::DegradeToEmpty),
        other => Err(format!(
            "unknown load mode '{}' (expected fail-fast or degrade-to-empty)",
            other
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = TomlConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;

    let level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "trendsfeed_api={0},trendsfeed_common={0},tower_http={0}",
                    level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!("Starting trendsfeed-api {}", BuildInfo::current());
    log_config_source(source.as_deref());

    let tags_path = args.tags.unwrap_or(config.data.tags_path);
    let articles_path = args.articles.unwrap_or(config.data.articles_path);
    let keyword_field = args.keyword_field.unwrap_or(config.pipeline.keyword_field);
    let load_mode = args.load_mode.unwrap_or(config.data.load_mode);

    let catalog = match CatalogSnapshot::load(&tags_path, &articles_path, &keyword_field, load_mode) {
        Ok(catalog) => {
            info!("✓ Catalog loaded (keyword field '{}')", keyword_field);
            catalog
        }
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return Err(e).context("Catalog unavailable (set load_mode = \"degrade-to-empty\" to start anyway)");
        }
    };

    let app = build_router(AppState::new(catalog));

    let mut server = config.server;
    server.apply_port_env().context("Invalid listen port")?;
    let host = args.host.unwrap_or(server.host);
    let port = args.port.unwrap_or(server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("trendsfeed-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
