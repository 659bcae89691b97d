//! Common error types for trendsfeed

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for trendsfeed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the trendsfeed crates
#[derive(Error, Debug)]
pub enum Error {
    /// An input artifact or spreadsheet is missing or could not be read
    #[error("Data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Spreadsheet could not be opened or parsed
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
