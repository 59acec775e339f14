//! CLI error types.

use capital_core::{CapitalError, ConfigError};
use thiserror::Error;

/// Errors surfaced by the `irb` command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Reference calculation disagreed with its expected value
    #[error("Self-check failed: {0}")]
    SelfCheck(String),

    /// I/O failure while reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed exposure CSV, or CSV output failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Single exposure computation failed
    #[error(transparent)]
    Capital(#[from] CapitalError),

    /// Exposure in an input file failed under `--fail-fast`
    #[error("Exposure at row {index} (id {id}) failed: {source}")]
    Exposure {
        /// Zero-based data row index
        index: usize,
        /// Exposure identifier, or the row index when the file has no id column
        id: String,
        /// Underlying calculation error
        #[source]
        source: CapitalError,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
