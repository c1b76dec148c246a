//! Timestamp synthesis.
//!
//! The export only carries a time-of-day; the calendar date comes from the
//! run configuration. Both are joined as `YYYY-MM-DD HH:MM:SS` and parsed
//! with that exact format.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DATE_FORMAT;
use crate::error::{TransformError, TransformResult};

/// Format of a synthesized `measured_at`, also used when emitting SQL.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("time-of-day pattern"));

/// Whether `value` has the `HH:MM:SS` shape. Ranges are not checked.
pub fn is_time_of_day(value: &str) -> bool {
    TIME_OF_DAY.is_match(value)
}

/// Combine the measurement date with a row's `time` field.
///
/// `row` and `line` only feed the error.
pub fn synthesize(date: NaiveDate, time: &str, row: usize, line: u64) -> TransformResult<NaiveDateTime> {
    let fail = |message: String| TransformError::TimestampParse {
        row,
        line,
        value: time.to_string(),
        message,
    };

    if !is_time_of_day(time) {
        return Err(fail("expected HH:MM:SS".to_string()));
    }

    let combined = format!("{} {}", date.format(DATE_FORMAT), time);
    let ts = NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT).map_err(|e| fail(e.to_string()))?;

    // chrono reads second 60 as a leap second; it would not render back as written
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(fail("second out of range".to_string()));
    }
    Ok(ts)
}

/// Render a timestamp the way it is written into SQL.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 18).unwrap()
    }

    #[test]
    fn test_synthesize_round_trip() {
        let ts = synthesize(date(), "08:15:05", 0, 2).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-11-18 08:15:05");
        assert_eq!(ts.date(), date());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (8, 15, 5));
        assert_eq!(ts.day(), 18);
    }

    #[test]
    fn test_out_of_range_time() {
        match synthesize(date(), "25:99:99", 3, 5) {
            Err(TransformError::TimestampParse { row, line, value, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(line, 5);
                assert_eq!(value, "25:99:99");
            }
            other => panic!("expected TimestampParse, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape() {
        for bad in ["12:30", "8:15:00", "08:15:00.5", "", "noon", "08-15-00", "08:15:60", "23:59:60"] {
            let err = synthesize(date(), bad, 1, 3).unwrap_err();
            assert_eq!(err.row(), Some(1), "value {:?}", bad);
        }
    }

    #[test]
    fn test_leap_second_rejected() {
        match synthesize(date(), "08:15:60", 2, 4) {
            Err(TransformError::TimestampParse { row, value, message, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "08:15:60");
                assert!(message.contains("second"));
            }
            other => panic!("expected TimestampParse, got {:?}", other),
        }

        let last = synthesize(date(), "23:59:59", 0, 2).unwrap();
        assert_eq!(format_timestamp(&last), "2025-11-18 23:59:59");
    }

    #[test]
    fn test_is_time_of_day() {
        assert!(is_time_of_day("00:00:00"));
        assert!(is_time_of_day("99:99:99"));
        assert!(!is_time_of_day("0:00:00"));
        assert!(!is_time_of_day("١٢:٣٠:٠٠"));
    }
}
