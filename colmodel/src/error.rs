//! Error types for configuration input.

use std::path::PathBuf;

/// A column width string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidthParseError {
    #[error("width is empty")]
    Empty,

    #[error("invalid width '{0}', expected pixels (\"120\", \"120px\") or a percentage (\"25%\")")]
    Invalid(String),
}

/// Errors loading a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid table config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{column}' has an invalid width: {source}")]
    Width {
        column: String,
        #[source]
        source: WidthParseError,
    },
}
