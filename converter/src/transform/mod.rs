//! Transformation module.
//!
//! This module turns loaded CSV rows into measurement records:
//! - Mapping: CSV columns to `raw_measurements` columns
//! - Timestamp: date + time-of-day synthesis
//! - Transformer: row-by-row record construction
//! - Pipeline: load → transform → emit

pub mod mapping;
pub mod pipeline;
pub mod timestamp;
pub mod transformer;

pub use mapping::{dropped_columns, ColumnIndex, TIME_COLUMN};
pub use pipeline::*;
pub use timestamp::{format_timestamp, is_time_of_day, synthesize, TIMESTAMP_FORMAT};
pub use transformer::{transform, Transformer, INITIAL_VALIDITY};
