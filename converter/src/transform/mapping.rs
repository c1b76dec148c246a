//! Column mapping from the CSV export to `raw_measurements`.
//!
//! ```text
//! time  → measured_at (with DATE_OF_MEASUREMENT)
//! GPS1  → latitude
//! GPS2  → longitude
//! A     → distance_left
//! C     → distance_right
//! *     → dropped
//! ```

use crate::error::{TransformError, TransformResult};
use crate::models::NumericField;

/// Time-of-day column in the export.
pub const TIME_COLUMN: &str = "time";

/// Header positions of every mapped column, resolved once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub time: usize,
    numeric: [usize; 4],
}

impl ColumnIndex {
    /// Resolve positions against a header row (exact, case-sensitive match).
    ///
    /// Fails with [`TransformError::MissingColumn`] on the first required
    /// column that is absent.
    pub fn resolve(headers: &[String]) -> TransformResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TransformError::MissingColumn(name.to_string()))
        };

        let time = find(TIME_COLUMN)?;
        let mut numeric = [0; 4];
        for (slot, field) in numeric.iter_mut().zip(NumericField::ALL) {
            *slot = find(field.source_column())?;
        }

        Ok(Self { time, numeric })
    }

    /// Header position of a numeric field.
    pub fn numeric(&self, field: NumericField) -> usize {
        // `NumericField::ALL` is in declaration order
        self.numeric[field as usize]
    }
}

/// Headers the mapping ignores, in file order.
pub fn dropped_columns(headers: &[String]) -> Vec<&str> {
    headers
        .iter()
        .map(String::as_str)
        .filter(|h| *h != TIME_COLUMN && NumericField::from_source_column(h).is_none())
        .collect()
}

/// Human-readable `source → destination` pairs for logging.
pub fn mapping_description() -> Vec<String> {
    std::iter::once(format!("{} → measured_at", TIME_COLUMN))
        .chain(
            NumericField::ALL
                .iter()
                .map(|f| format!("{} → {}", f.source_column(), f.column_name())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_standard_export() {
        let h = headers(&["time", "GPS1", "GPS2", "A", "B", "C"]);
        let index = ColumnIndex::resolve(&h).unwrap();

        assert_eq!(index.time, 0);
        assert_eq!(index.numeric(NumericField::Latitude), 1);
        assert_eq!(index.numeric(NumericField::Longitude), 2);
        assert_eq!(index.numeric(NumericField::DistanceLeft), 3);
        assert_eq!(index.numeric(NumericField::DistanceRight), 5);
    }

    #[test]
    fn test_resolve_reordered_columns() {
        let h = headers(&["C", "A", "time", "GPS2", "GPS1"]);
        let index = ColumnIndex::resolve(&h).unwrap();
        assert_eq!(index.time, 2);
        assert_eq!(index.numeric(NumericField::Latitude), 4);
        assert_eq!(index.numeric(NumericField::DistanceRight), 0);
    }

    #[test]
    fn test_missing_column() {
        let h = headers(&["time", "gps1", "GPS2", "A", "C"]);
        match ColumnIndex::resolve(&h) {
            Err(TransformError::MissingColumn(name)) => assert_eq!(name, "GPS1"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_dropped_columns() {
        let h = headers(&["time", "GPS1", "GPS2", "A", "B", "C", "speed"]);
        assert_eq!(dropped_columns(&h), vec!["B", "speed"]);
    }

    #[test]
    fn test_mapping_description() {
        let lines = mapping_description();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "GPS1 → latitude");
    }
}
