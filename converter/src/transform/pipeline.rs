//! High-level pipeline API: CSV export → SQL bulk-insert file.
//!
//! Combines the three stages in a single forward pass:
//! loading, transformation, emission. Any failure aborts the run before the
//! output file is touched.
//!
//! # Example
//!
//! ```rust,no_run
//! use clearway::{convert, ConvertConfig};
//!
//! let summary = convert(&ConvertConfig::default()).unwrap();
//! println!("Wrote {} statements", summary.statements_written);
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::ConvertConfig;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::parser::{load_csv_file, RawTable};
use crate::sql::{insert_statement, SqlBatch};
use super::mapping::{dropped_columns, mapping_description};
use super::transformer::Transformer;

/// Result of a completed conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub session_id: String,
    pub date_of_measurement: NaiveDate,
    /// Data rows read (header excluded)
    pub rows_read: usize,
    /// `INSERT` statements written
    pub statements_written: usize,
    pub bytes_written: u64,
    /// Input columns the mapping ignored
    pub dropped_columns: Vec<String>,
}

/// Convert the configured CSV export into a SQL bulk-insert file.
///
/// # Steps
/// 1. Check the session id
/// 2. Load the CSV
/// 3. Transform every row (first failure aborts)
/// 4. Render and atomically write the SQL batch
pub fn convert(config: &ConvertConfig) -> PipelineResult<ConversionSummary> {
    config.check_session_id()?;

    let table = load(config)?;
    let dropped: Vec<String> = dropped_columns(&table.headers)
        .into_iter()
        .map(str::to_string)
        .collect();

    log_info("🔄 Transforming rows...");
    let transformer = Transformer::new(&table, &config.session_id, config.date_of_measurement)?;
    for line in mapping_description() {
        log_info_indent(line, 1);
    }
    if !dropped.is_empty() {
        log_info_indent(format!("ignored: {}", dropped.join(", ")), 1);
    }
    let records = transformer.transform_all()?;
    log_success(format!("{} records for session {}", records.len(), config.session_id));

    log_info(format!("🧾 Generating SQL for {} rows...", records.len()));
    let batch = SqlBatch::from_records(&records);
    let bytes_written = batch.write_to(&config.output_file)?;
    log_success(format!(
        "Wrote {} ({} bytes). Run it in your database query tool.",
        config.output_file.display(),
        bytes_written
    ));

    Ok(ConversionSummary {
        input_file: config.input_file.clone(),
        output_file: config.output_file.clone(),
        session_id: config.session_id.clone(),
        date_of_measurement: config.date_of_measurement,
        rows_read: table.len(),
        statements_written: batch.statement_count(),
        bytes_written,
        dropped_columns: dropped,
    })
}

/// Render the first `limit` `INSERT` statements without writing anything.
///
/// Only the previewed rows are transformed, so a bad row further down the
/// file does not fail the preview.
pub fn preview(config: &ConvertConfig, limit: usize) -> PipelineResult<Vec<String>> {
    config.check_session_id()?;

    let table = load(config)?;
    let transformer = Transformer::new(&table, &config.session_id, config.date_of_measurement)?;

    let mut statements = Vec::with_capacity(limit.min(table.len()));
    for record in transformer.records().take(limit) {
        statements.push(insert_statement(&record?));
    }
    Ok(statements)
}

fn load(config: &ConvertConfig) -> PipelineResult<RawTable> {
    log_info(format!("📖 Reading {}...", config.input_file.display()));
    let table = load_csv_file(&config.input_file, config.delimiter)?;
    log_success(format!("Read {} rows", table.len()));

    log_info(format!("📋 CSV has {} columns:", table.headers.len()));
    for (i, (name, kind)) in table.column_kinds().iter().enumerate() {
        log_info_indent(format!("[{:2}] {} ({:?})", i + 1, name, kind), 1);
    }
    if table.is_empty() {
        log_warning("No data rows, the batch will only contain the transaction envelope");
    }
    Ok(table)
}
