//! Domain models for the conversion pipeline.
//!
//! - [`NumericField`] - The four sensor columns and their destination names
//! - [`MeasurementRecord`] - One transformed row, ready for SQL emission

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Numeric Fields
// =============================================================================

/// Sensor columns carried over from the CSV export.
///
/// Each variant knows its column name in the export and in `raw_measurements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// GPS1
    Latitude,
    /// GPS2
    Longitude,
    /// Distance sensor A
    DistanceLeft,
    /// Distance sensor C
    DistanceRight,
}

impl NumericField {
    /// All fields, in emission order.
    pub const ALL: [NumericField; 4] = [
        NumericField::Latitude,
        NumericField::Longitude,
        NumericField::DistanceLeft,
        NumericField::DistanceRight,
    ];

    /// Column name in the CSV export.
    pub fn source_column(&self) -> &'static str {
        match self {
            NumericField::Latitude => "GPS1",
            NumericField::Longitude => "GPS2",
            NumericField::DistanceLeft => "A",
            NumericField::DistanceRight => "C",
        }
    }

    /// Column name in `raw_measurements`.
    pub fn column_name(&self) -> &'static str {
        match self {
            NumericField::Latitude => "latitude",
            NumericField::Longitude => "longitude",
            NumericField::DistanceLeft => "distance_left",
            NumericField::DistanceRight => "distance_right",
        }
    }

    /// Look up a field by its CSV column name (exact, case-sensitive).
    pub fn from_source_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.source_column() == name)
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

// =============================================================================
// Measurement Record
// =============================================================================

/// One sensor reading at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub session_id: String,
    pub measured_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_left: f64,
    pub distance_right: f64,
    pub is_valid: bool,
}

impl MeasurementRecord {
    /// Value of a numeric field.
    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Latitude => self.latitude,
            NumericField::Longitude => self.longitude,
            NumericField::DistanceLeft => self.distance_left,
            NumericField::DistanceRight => self.distance_right,
        }
    }
}
