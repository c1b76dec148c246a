//! Error types for the ClearWay conversion pipeline.
//!
//! One error type per pipeline stage:
//!
//! - [`ConfigError`] - Option resolution (date, session id)
//! - [`DataSourceError`] - CSV loading errors
//! - [`TransformError`] - Timestamp synthesis and numeric coercion errors
//! - [`OutputWriteError`] - SQL file emission errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Stage errors convert into [`PipelineError`] via `From`, so `?` works
//! across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while resolving the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DATE_OF_MEASUREMENT` is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid DATE_OF_MEASUREMENT '{value}': expected YYYY-MM-DD ({source})")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// `SESSION_ID` is not UUID-shaped and strict checking was requested.
    #[error("Invalid SESSION_ID '{value}': {source}")]
    InvalidSessionId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// Delimiter must be a single ASCII character.
    #[error("Invalid delimiter '{0}': must be a single ASCII character")]
    InvalidDelimiter(char),
}

// =============================================================================
// Data Source Errors
// =============================================================================

/// Errors while loading the input CSV.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Failed to open or read the input file.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid UTF-8.
    #[error("Input is not valid UTF-8 (byte offset {offset})")]
    Encoding { offset: usize },

    /// Malformed CSV (ragged rows, broken quoting).
    #[error("Malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

impl DataSourceError {
    /// Build a [`DataSourceError::Malformed`] from a `csv` crate error.
    pub fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
                format!("expected {} fields, found {}", expected_len, len)
            }
            csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8 in field {}", err.field()),
            _ => err.to_string(),
        };
        DataSourceError::Malformed { line, message }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while turning raw rows into measurement records.
///
/// `row` is the 0-based data row index (header excluded), `line` the
/// 1-based line in the input file.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Header lacks a column the mapping requires.
    #[error("Missing source column: {0}")]
    MissingColumn(String),

    /// `time` does not match `HH:MM:SS`, or the combined date-time is invalid.
    #[error("Row {row} (line {line}): cannot parse timestamp '{value}': {message}")]
    TimestampParse {
        row: usize,
        line: u64,
        value: String,
        message: String,
    },

    /// A numeric field holds a value that is not a finite number.
    #[error("Row {row} (line {line}): field '{field}' has non-numeric value '{value}'")]
    TypeCoercion {
        row: usize,
        line: u64,
        field: String,
        value: String,
    },
}

impl TransformError {
    /// Data row index the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            TransformError::MissingColumn(_) => None,
            TransformError::TimestampParse { row, .. } | TransformError::TypeCoercion { row, .. } => {
                Some(*row)
            }
        }
    }
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the SQL file.
#[derive(Debug, Error)]
#[error("Failed to write '{}': {source}", path.display())]
pub struct OutputWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl OutputWriteError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input loading error.
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    /// Row transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// SQL file write error.
    #[error("Output error: {0}")]
    Output(#[from] OutputWriteError),
}

impl PipelineError {
    /// Process exit status for this error. Zero is reserved for success and
    /// 2 for command-line usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Config(_) => 7,
            PipelineError::DataSource(_) => 3,
            PipelineError::Transform(TransformError::MissingColumn(_)) => 3,
            PipelineError::Transform(TransformError::TimestampParse { .. }) => 4,
            PipelineError::Transform(TransformError::TypeCoercion { .. }) => 5,
            PipelineError::Output(_) => 6,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CSV loading.
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Result type for row transformation.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
