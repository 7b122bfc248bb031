//! Dataset error types
//!
//! Defines all errors that can occur while acquiring, decoding and parsing
//! a dataset. Every variant is terminal for the current render pass but the
//! next interaction may succeed (different source, reload, etc.).

use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Local path missing or URL unreachable
    #[error("Data source not found: {location} ({reason})")]
    FileNotFound { location: String, reason: String },

    /// None of the configured encodings could decode the payload
    #[error("Could not decode {location} with any of: {}", .attempted.join(", "))]
    EncodingFailure {
        location: String,
        attempted: Vec<String>,
    },

    /// Loaded fine but holds no data rows
    #[error("Dataset is empty: {location}")]
    EmptyDataset { location: String },

    /// A required column is absent
    #[error("Missing column '{column}'; available columns: {}", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Payload is not a well-formed CSV table
    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP transport failed after the connection was established
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Parse(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
