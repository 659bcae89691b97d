//! Configuration loading and config file resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (applied by each binary)
//! 2. Environment variables (applied by each binary via clap `env`)
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: compiled defaults are used. A TOML
//! file that exists but cannot be parsed is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::keywords::{TagSelection, DEFAULT_TOP_K};
use crate::pipeline::{PipelineOptions, DEFAULT_KEYWORD_FIELD};
use crate::snapshot::LoadMode;
use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TRENDSFEED_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "trendsfeed.toml";

/// Listen port variable set by most hosting platforms
pub const PORT_ENV_VAR: &str = "PORT";

/// Complete TOML configuration; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub ingest: IngestConfig,
    pub data: DataConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Selection mode as written in TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    #[default]
    TopK,
    Unlimited,
}

/// `[pipeline]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Field holding each article's keyword ("Verb Phrase", "Keywords", ...)
    pub keyword_field: String,
    pub selection: SelectionMode,
    /// Used when `selection = "top-k"`
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keyword_field: DEFAULT_KEYWORD_FIELD.to_string(),
            selection: SelectionMode::TopK,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PipelineConfig {
    pub fn tag_selection(&self) -> TagSelection {
        match self.selection {
            SelectionMode::TopK => TagSelection::TopK(self.top_k),
            SelectionMode::Unlimited => TagSelection::Unlimited,
        }
    }

    pub fn to_options(&self) -> PipelineOptions {
        PipelineOptions::new(self.keyword_field.clone(), self.tag_selection())
    }
}

/// Mapping from a spreadsheet column to an output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Column header in the spreadsheet (after trimming)
    pub source: String,
    /// Field name written to the article artifact
    pub output: String,
}

impl FieldMapping {
    pub fn new(source: &str, output: &str) -> Self {
        Self {
            source: source.to_string(),
            output: output.to_string(),
        }
    }
}

/// `[ingest]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Worksheet to read (default: first worksheet)
    pub sheet: Option<String>,
    /// A row is dropped when all of these columns are blank
    pub required_columns: Vec<String>,
    /// Output fields after the keyword field, in order
    pub fields: Vec<FieldMapping>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            required_columns: ["Article Title", "Summary", "Overview", "Article Link"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fields: vec![
                FieldMapping::new("Article Title", "ArticleTitle"),
                FieldMapping::new("Summary", "Summary"),
                FieldMapping::new("Overview", "Overview"),
                FieldMapping::new("Article Link", "Article Link"),
            ],
        }
    }
}

/// `[data]` section: artifact locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub tags_path: PathBuf,
    pub articles_path: PathBuf,
    pub load_mode: LoadMode,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            tags_path: PathBuf::from("tags.json"),
            articles_path: PathBuf::from("data.json"),
            load_mode: LoadMode::FailFast,
        }
    }
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Override the port from `PORT` when it is set
    ///
    /// A set but unparseable value is an error rather than a silent fallback.
    pub fn apply_port_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(PORT_ENV_VAR) {
            let value = value.trim();
            if !value.is_empty() {
                self.port = value.parse().map_err(|_| {
                    Error::Config(format!("{} must be a port number, got '{}'", PORT_ENV_VAR, value))
                })?;
            }
        }
        Ok(())
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
            .map_err(|e| Error::Config(format!("{} ({})", e, path.display())))
    }

    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(text)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.keyword_field.trim().is_empty() {
            return Err(Error::Config("pipeline.keyword_field must not be empty".into()));
        }
        if self.pipeline.selection == SelectionMode::TopK && self.pipeline.top_k == 0 {
            return Err(Error::Config(
                "pipeline.top_k must be at least 1 (use selection = \"unlimited\" to keep all)"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Resolve and load configuration
    ///
    /// Returns the config and the file it came from (`None` for defaults).
    pub fn resolve(cli_path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let resolver = ConfigResolver::new();
        match resolver.resolve(cli_path) {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => {
                let config = Self::load(&path)?;
                Ok((config, Some(path)))
            }
            ConfigSource::Defaults => Ok((Self::default(), None)),
        }
    }
}

/// Where configuration was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line or in `TRENDSFEED_CONFIG`; must exist
    Explicit(PathBuf),
    /// Found at a well-known location
    Discovered(PathBuf),
    /// Nothing found; compiled defaults apply
    Defaults,
}

/// Config file lookup
///
/// Priority order:
/// 1. Command-line `--config`
/// 2. `TRENDSFEED_CONFIG` environment variable
/// 3. `./trendsfeed.toml`
/// 4. `<user config dir>/trendsfeed/config.toml`
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    working_dir: PathBuf,
    user_config: Option<PathBuf>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            user_config: dirs::config_dir().map(|d| d.join("trendsfeed").join("config.toml")),
        }
    }

    /// Resolver rooted somewhere other than the process defaults (tests)
    pub fn with_locations(working_dir: impl Into<PathBuf>, user_config: Option<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            user_config,
        }
    }

    pub fn resolve(&self, cli_path: Option<&Path>) -> ConfigSource {
        if let Some(path) = cli_path {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Explicit(PathBuf::from(path));
            }
        }

        let local = self.working_dir.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return ConfigSource::Discovered(local);
        }

        if let Some(user) = &self.user_config {
            if user.exists() {
                return ConfigSource::Discovered(user.clone());
            }
        }

        ConfigSource::Defaults
    }
}

/// Log where configuration came from
pub fn log_config_source(source: Option<&Path>) {
    match source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => warn!("No configuration file found, using compiled defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.pipeline.keyword_field, "Verb Phrase");
        assert_eq!(config.pipeline.tag_selection(), TagSelection::TopK(10));
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.data.load_mode, LoadMode::FailFast);
        assert_eq!(config.ingest.fields.len(), 4);
    }

    #[test]
    fn test_empty_toml_is_defaults() {
        assert_eq!(TomlConfig::parse("").unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = TomlConfig::parse(
            r#"
            [pipeline]
            keyword_field = "Keywords"
            selection = "unlimited"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.keyword_field, "Keywords");
        assert_eq!(config.pipeline.tag_selection(), TagSelection::Unlimited);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let err = TomlConfig::parse("[pipeline]\ntop_k = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_keyword_field_rejected() {
        assert!(TomlConfig::parse("[pipeline]\nkeyword_field = \"  \"").is_err());
    }

    #[test]
    fn test_unknown_selection_rejected() {
        assert!(TomlConfig::parse("[pipeline]\nselection = \"some\"").is_err());
    }
}
