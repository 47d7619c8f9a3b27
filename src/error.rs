use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// A single line that is not a valid JSON object. Recovered by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: JSON error - {message}")]
pub struct DecodeError {
    pub line_number: usize,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Log file not found at path: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No valid data found in the log file ({defects} malformed lines).")]
    EmptyDataset { defects: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Missing required column: '{0}'")]
    MissingTimestamp(String),
    #[error("None of the target fields were found in the dataset: {}", .0.join(", "))]
    NoRecognizedFields(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Failed to parse timestamp: no row has an integer microsecond value for '{key}'")]
    Unparseable { key: String },
}

/// Everything that halts the pipeline before any series is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}
