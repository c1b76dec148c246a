//! Run configuration.
//!
//! The four named options of a conversion run (input path, output path,
//! session identifier, measurement date) plus the CSV delimiter. Defaults
//! match the paths the ClearWay tooling has always used, relative to the
//! invocation directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{ConfigError, ConfigResult};
use crate::logs::log_warning;

/// Default `INPUT_FILE`.
pub const DEFAULT_INPUT_FILE: &str = "../data/dataset.csv";

/// Default `OUTPUT_FILE`.
pub const DEFAULT_OUTPUT_FILE: &str = "../sql/output.sql";

/// Default `SESSION_ID` (the nil UUID).
pub const DEFAULT_SESSION_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Default `DATE_OF_MEASUREMENT`.
pub const DEFAULT_DATE_OF_MEASUREMENT: &str = "2025-11-18";

/// Format of `DATE_OF_MEASUREMENT`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Options for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertConfig {
    /// Telemetry CSV to read
    pub input_file: PathBuf,

    /// SQL file to create or overwrite
    pub output_file: PathBuf,

    /// Session identifier stamped on every record
    pub session_id: String,

    /// Calendar date combined with each row's time-of-day
    pub date_of_measurement: NaiveDate,

    /// CSV field delimiter
    pub delimiter: u8,

    /// Reject a session id that is not UUID-shaped instead of warning
    pub strict_session_id: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            session_id: DEFAULT_SESSION_ID.to_string(),
            date_of_measurement: NaiveDate::from_ymd_opt(2025, 11, 18)
                .unwrap_or(NaiveDate::MIN),
            delimiter: b',',
            strict_session_id: false,
        }
    }
}

impl ConvertConfig {
    /// Validate the session id against the UUID shape.
    ///
    /// Any string is accepted unless `strict_session_id` is set; a value
    /// that does not parse as a UUID only produces a warning.
    pub fn check_session_id(&self) -> ConfigResult<()> {
        match Uuid::parse_str(&self.session_id) {
            Ok(_) => Ok(()),
            Err(source) if self.strict_session_id => Err(ConfigError::InvalidSessionId {
                value: self.session_id.clone(),
                source,
            }),
            Err(_) => {
                log_warning(format!(
                    "SESSION_ID '{}' is not a UUID, using it verbatim",
                    self.session_id
                ));
                Ok(())
            }
        }
    }

    /// Measurement date as it appears in the emitted timestamps.
    pub fn date_string(&self) -> String {
        self.date_of_measurement.format(DATE_FORMAT).to_string()
    }
}

/// Parse a `DATE_OF_MEASUREMENT` value (`YYYY-MM-DD`).
pub fn parse_measurement_date(value: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| ConfigError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Parse a single-character delimiter option into a byte.
pub fn parse_delimiter(value: char) -> ConfigResult<u8> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(ConfigError::InvalidDelimiter(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.input_file, PathBuf::from("../data/dataset.csv"));
        assert_eq!(config.output_file, PathBuf::from("../sql/output.sql"));
        assert_eq!(config.session_id, DEFAULT_SESSION_ID);
        assert_eq!(config.date_string(), DEFAULT_DATE_OF_MEASUREMENT);
        assert_eq!(config.delimiter, b',');
    }

    #[test]
    fn test_parse_measurement_date() {
        let date = parse_measurement_date("2025-11-18").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 18).unwrap());

        assert!(parse_measurement_date("18/11/2025").is_err());
        assert!(parse_measurement_date("2025-02-30").is_err());
    }

    #[test]
    fn test_session_id_accepts_any_string_when_lenient() {
        let config = ConvertConfig {
            session_id: "drive-42".into(),
            ..Default::default()
        };
        assert!(config.check_session_id().is_ok());
    }

    #[test]
    fn test_session_id_rejected_when_strict() {
        let config = ConvertConfig {
            session_id: "drive-42".into(),
            strict_session_id: true,
            ..Default::default()
        };
        let err = config.check_session_id().unwrap_err();
        assert!(err.to_string().contains("drive-42"));

        let ok = ConvertConfig {
            session_id: Uuid::new_v4().to_string(),
            strict_session_id: true,
            ..Default::default()
        };
        assert!(ok.check_session_id().is_ok());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(';').unwrap(), b';');
        assert!(parse_delimiter('§').is_err());
    }
}
