//! SQL bulk-insert emission.
//!
//! Renders measurement records as one `INSERT` per record inside a single
//! `BEGIN;` / `COMMIT;` envelope:
//!
//! ```text
//! -- Bulk Insert for ClearWay
//! BEGIN;
//! INSERT INTO raw_measurements (session_id, ...) VALUES ('…', '…', …);
//! COMMIT;
//! ```
//!
//! Values are interpolated as literal text, not escaped or parameterized.
//! Input is trusted telemetry; the output is meant for a database client
//! such as psql or pgAdmin.
//!
//! The whole batch is rendered in memory first and written by replacing the
//! destination atomically, so a failed run never leaves a partial file.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::OutputWriteError;
use crate::models::{MeasurementRecord, NumericField};
use crate::transform::timestamp::format_timestamp;

/// Destination table.
pub const TARGET_TABLE: &str = "raw_measurements";

/// First line of every batch.
pub const BATCH_COMMENT: &str = "-- Bulk Insert for ClearWay";

/// Transaction start marker.
pub const BEGIN: &str = "BEGIN;";

/// Transaction commit marker.
pub const COMMIT: &str = "COMMIT;";

/// Column list of every `INSERT`, in value order.
pub const INSERT_COLUMNS: [&str; 7] = [
    "session_id",
    "measured_at",
    "latitude",
    "longitude",
    "distance_left",
    "distance_right",
    "is_valid",
];

// =============================================================================
// Literals
// =============================================================================

/// Single-quoted string literal. Not escaped.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value)
}

/// Numeric literal. Always carries a decimal point or exponent (`3.0`, `1e-5`).
pub fn float_literal(value: f64) -> String {
    format!("{:?}", value)
}

/// SQL boolean literal.
pub fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// One `INSERT` statement, without trailing newline.
pub fn insert_statement(record: &MeasurementRecord) -> String {
    let numbers: Vec<String> = NumericField::ALL
        .iter()
        .map(|f| float_literal(record.value(*f)))
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}, {}, {}, {});",
        TARGET_TABLE,
        INSERT_COLUMNS.join(", "),
        string_literal(&record.session_id),
        string_literal(&format_timestamp(&record.measured_at)),
        numbers.join(", "),
        bool_literal(record.is_valid),
    )
}

// =============================================================================
// Batch
// =============================================================================

/// A fully rendered bulk-insert file
#[derive(Debug, Clone, PartialEq)]
pub struct SqlBatch {
    text: String,
    statements: usize,
}

impl SqlBatch {
    /// Render records in order.
    pub fn from_records(records: &[MeasurementRecord]) -> Self {
        let mut text = String::with_capacity(64 + records.len() * 192);
        push_line(&mut text, BATCH_COMMENT);
        push_line(&mut text, BEGIN);
        for record in records {
            push_line(&mut text, &insert_statement(record));
        }
        push_line(&mut text, COMMIT);

        Self {
            text,
            statements: records.len(),
        }
    }

    /// Number of `INSERT` statements.
    pub fn statement_count(&self) -> usize {
        self.statements
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements == 0
    }

    /// Create or overwrite `path` with this batch. Returns bytes written.
    pub fn write_to(&self, path: &Path) -> Result<u64, OutputWriteError> {
        write_atomic(path, self.text.as_bytes())?;
        Ok(self.text.len() as u64)
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

/// Replace `path` with `contents` via a temporary file in the same directory.
///
/// The destination is either left untouched or fully replaced. Permissions
/// of an existing destination are kept.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), OutputWriteError> {
    // tempfile errors name the random temp file; report only the destination
    let err = |source: std::io::Error| OutputWriteError::new(path, std::io::Error::from(source.kind()));

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(err)?;
    tmp.write_all(contents).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;

    match fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions()).map_err(err)?,
        Err(_) => default_permissions(tmp.as_file()).map_err(err)?,
    }

    tmp.persist(path).map_err(|e| err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
