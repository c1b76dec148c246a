//! # ClearWay converter - telemetry CSV to SQL bulk insert
//!
//! Converts the CSV export of a ClearWay measurement drive (time, GPS,
//! distance sensors) into a SQL file that inserts every reading into
//! `raw_measurements` inside a single transaction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Loader    │────▶│ Transformer │────▶│   Emitter   │──▶ output.sql
//! │ time,GPS1.. │     │   (csv)     │     │ (remap, ts) │     │ BEGIN..COMMIT│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clearway::{convert, ConvertConfig};
//! use std::path::PathBuf;
//!
//! let config = ConvertConfig {
//!     input_file: PathBuf::from("data/dataset.csv"),
//!     output_file: PathBuf::from("sql/output.sql"),
//!     ..Default::default()
//! };
//! let summary = convert(&config).unwrap();
//! println!("{} INSERT statements", summary.statements_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per pipeline stage
//! - [`config`] - Run configuration and defaults
//! - [`models`] - Measurement record and sensor fields
//! - [`parser`] - CSV loading
//! - [`transform`] - Column mapping, timestamp synthesis, pipeline
//! - [`sql`] - SQL batch rendering and atomic file output
//! - [`logs`] - Progress logging facade

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Emission
pub mod sql;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    DataSourceError,
    OutputWriteError,
    PipelineError,
    TransformError,
};

// =============================================================================
// Re-exports - Configuration & Models
// =============================================================================

pub use config::{parse_delimiter, parse_measurement_date, ConvertConfig};
pub use models::{MeasurementRecord, NumericField};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use parser::{load_csv_file, parse_bytes, parse_str, ColumnKind, RawRow, RawTable};

// =============================================================================
// Re-exports - Transformer & Pipeline
// =============================================================================

pub use transform::{
    convert,
    preview,
    transform,
    ConversionSummary,
    Transformer,
};

// =============================================================================
// Re-exports - Emitter
// =============================================================================

pub use sql::{insert_statement, SqlBatch};
