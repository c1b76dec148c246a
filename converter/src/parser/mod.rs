//! CSV loader for telemetry exports.
//!
//! Reads a delimited file with a header row into a [`RawTable`], keeping
//! row order and the raw text of every field. Values are not interpreted
//! here; numeric and timestamp coercion happens in the transformer.

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{DataSourceError, DataSourceResult};
use crate::transform::timestamp::is_time_of_day;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Kind of values seen in a column, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every value looks like `HH:MM:SS`
    Time,
    /// Every value parses as a number
    Number,
    /// Anything else
    Text,
    /// No non-empty values
    Empty,
}

impl ColumnKind {
    /// Infer the kind from the raw values of one column.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Empty;
        for value in values.into_iter().filter(|v| !v.is_empty()) {
            let seen = if is_time_of_day(value) {
                ColumnKind::Time
            } else if value.parse::<f64>().is_ok() {
                ColumnKind::Number
            } else {
                return ColumnKind::Text;
            };
            kind = match (kind, seen) {
                (ColumnKind::Empty, s) => s,
                (k, s) if k == s => k,
                _ => return ColumnKind::Text,
            };
        }
        kind
    }
}

/// One data row as read from the file
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 0-based data row index (header excluded)
    pub index: usize,
    /// 1-based line number in the source file
    pub line: u64,
    /// Field values, aligned with [`RawTable::headers`]
    pub fields: Vec<String>,
}

/// Loaded CSV with metadata
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column headers in file order
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<RawRow>,
    /// Delimiter used
    pub delimiter: u8,
}

impl RawTable {
    /// Inferred kind for every column, in header order.
    pub fn column_kinds(&self) -> Vec<(String, ColumnKind)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let values = self
                    .rows
                    .iter()
                    .map(|row| row.fields.get(i).map(String::as_str).unwrap_or(""));
                (header.clone(), ColumnKind::infer(values))
            })
            .collect()
    }

    /// Rows as JSON objects keyed by header.
    pub fn to_json(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row.fields.iter())
                    .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                    .collect();
                Value::Object(obj)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a CSV file from disk.
pub fn load_csv_file<P: AsRef<Path>>(path: P, delimiter: u8) -> DataSourceResult<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes, delimiter)
}

/// Parse CSV bytes. A UTF-8 byte-order mark is skipped.
pub fn parse_bytes(bytes: &[u8], delimiter: u8) -> DataSourceResult<RawTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = std::str::from_utf8(bytes).map_err(|e| DataSourceError::Encoding {
        offset: e.valid_up_to(),
    })?;
    parse_str(content, delimiter)
}

/// Parse CSV text with an explicit delimiter.
///
/// # Example
/// ```
/// use clearway::parser::parse_str;
///
/// let table = parse_str("time,GPS1\n08:15:00,40.1\n", b',').unwrap();
/// assert_eq!(table.headers, vec!["time", "GPS1"]);
/// assert_eq!(table.rows[0].fields, vec!["08:15:00", "40.1"]);
/// ```
pub fn parse_str(content: &str, delimiter: u8) -> DataSourceResult<RawTable> {
    if content.trim().is_empty() {
        return Err(DataSourceError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(DataSourceError::from_csv)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataSourceError::EmptyFile);
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(DataSourceError::from_csv)?;
        let line = record.position().map(|p| p.line()).unwrap_or(index as u64 + 2);
        rows.push(RawRow {
            index,
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(RawTable {
        headers,
        rows,
        delimiter,
    })
}
