//! Row transformer.
//!
//! Turns a [`RawTable`] into [`MeasurementRecord`]s: remaps the sensor
//! columns, synthesizes `measured_at` and stamps the run constants. Rows
//! come out in input order, one record per row.

use chrono::NaiveDate;

use crate::error::{TransformError, TransformResult};
use crate::models::{MeasurementRecord, NumericField};
use crate::parser::{RawRow, RawTable};
use super::mapping::ColumnIndex;
use super::timestamp::synthesize;

/// Value of `is_valid` on every emitted record.
pub const INITIAL_VALIDITY: bool = false;

/// Transforms the rows of one loaded table
#[derive(Debug)]
pub struct Transformer<'a> {
    table: &'a RawTable,
    columns: ColumnIndex,
    session_id: &'a str,
    date: NaiveDate,
}

impl<'a> Transformer<'a> {
    /// Resolve the column mapping against the table header.
    pub fn new(table: &'a RawTable, session_id: &'a str, date: NaiveDate) -> TransformResult<Self> {
        let columns = ColumnIndex::resolve(&table.headers)?;
        Ok(Self {
            table,
            columns,
            session_id,
            date,
        })
    }

    /// Lazily transform rows in input order.
    pub fn records(&self) -> impl Iterator<Item = TransformResult<MeasurementRecord>> + '_ {
        self.table.rows.iter().map(move |row| self.transform_row(row))
    }

    /// Transform every row, stopping at the first error.
    pub fn transform_all(&self) -> TransformResult<Vec<MeasurementRecord>> {
        self.records().collect()
    }

    fn transform_row(&self, row: &RawRow) -> TransformResult<MeasurementRecord> {
        let time = field(row, self.columns.time);
        let measured_at = synthesize(self.date, time, row.index, row.line)?;

        let number = |f: NumericField| coerce(row, f, field(row, self.columns.numeric(f)));

        Ok(MeasurementRecord {
            session_id: self.session_id.to_string(),
            measured_at,
            latitude: number(NumericField::Latitude)?,
            longitude: number(NumericField::Longitude)?,
            distance_left: number(NumericField::DistanceLeft)?,
            distance_right: number(NumericField::DistanceRight)?,
            is_valid: INITIAL_VALIDITY,
        })
    }
}

/// Transform a whole table in one call.
pub fn transform(
    table: &RawTable,
    session_id: &str,
    date: NaiveDate,
) -> TransformResult<Vec<MeasurementRecord>> {
    Transformer::new(table, session_id, date)?.transform_all()
}

fn field(row: &RawRow, index: usize) -> &str {
    row.fields.get(index).map(String::as_str).unwrap_or("")
}

/// Coerce a raw field to a finite `f64`.
fn coerce(row: &RawRow, field: NumericField, raw: &str) -> TransformResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TransformError::TypeCoercion {
            row: row.index,
            line: row.line,
            field: field.column_name().to_string(),
            value: raw.to_string(),
        })
}
