//! End-to-end conversion tests: CSV file in, SQL file out.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use clearway::{convert, ConvertConfig, PipelineError, TransformError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const NIL_SESSION: &str = "00000000-0000-0000-0000-000000000000";

const DRIVE: &str = "time,GPS1,GPS2,A,B,C\n\
                     08:15:00,40.1,-75.2,2.3,99,1.1\n\
                     08:15:05,40.1001,-75.2001,2.4,99,1.0\n";

fn config(dir: &Path, csv: &str) -> ConvertConfig {
    let input_file = dir.join("dataset.csv");
    fs::write(&input_file, csv).unwrap();
    ConvertConfig {
        input_file,
        output_file: dir.join("output.sql"),
        session_id: NIL_SESSION.to_string(),
        date_of_measurement: NaiveDate::from_ymd_opt(2025, 11, 18).unwrap(),
        ..Default::default()
    }
}

fn insert_lines(sql: &str) -> Vec<&str> {
    sql.lines().filter(|l| l.starts_with("INSERT INTO")).collect()
}

/// Pull the quoted `measured_at` literal out of an INSERT line.
fn measured_at(line: &str) -> NaiveDateTime {
    let values = line.split("VALUES (").nth(1).unwrap();
    let literal = values.split(", ").nth(1).unwrap().trim_matches('\'');
    NaiveDateTime::parse_from_str(literal, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn two_row_drive_produces_exact_file() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), DRIVE);

    convert(&config).unwrap();
    let sql = fs::read_to_string(&config.output_file).unwrap();

    let expected = "\
-- Bulk Insert for ClearWay
BEGIN;
INSERT INTO raw_measurements (session_id, measured_at, latitude, longitude, distance_left, distance_right, is_valid) VALUES ('00000000-0000-0000-0000-000000000000', '2025-11-18 08:15:00', 40.1, -75.2, 2.3, 1.1, false);
INSERT INTO raw_measurements (session_id, measured_at, latitude, longitude, distance_left, distance_right, is_valid) VALUES ('00000000-0000-0000-0000-000000000000', '2025-11-18 08:15:05', 40.1001, -75.2001, 2.4, 1.0, false);
COMMIT;
";
    assert_eq!(sql, expected);
}

#[test]
fn one_insert_per_data_row() {
    let dir = tempdir().unwrap();
    let mut csv = String::from("time,GPS1,GPS2,A,B,C\n");
    for s in 0..125 {
        csv.push_str(&format!("09:{:02}:{:02},51.5,-0.12,1.0,0,2.0\n", s / 60, s % 60));
    }
    let config = config(dir.path(), &csv);

    let summary = convert(&config).unwrap();
    let sql = fs::read_to_string(&config.output_file).unwrap();

    assert_eq!(summary.rows_read, 125);
    assert_eq!(insert_lines(&sql).len(), 125);
}

#[test]
fn measured_at_round_trips_to_date_and_time() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), DRIVE);
    convert(&config).unwrap();
    let sql = fs::read_to_string(&config.output_file).unwrap();

    let times: Vec<NaiveDateTime> = insert_lines(&sql).into_iter().map(measured_at).collect();
    assert_eq!(times.len(), 2);
    for (ts, (h, m, s)) in times.iter().zip([(8, 15, 0), (8, 15, 5)]) {
        assert_eq!(ts.date(), config.date_of_measurement);
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (h, m, s));
    }
}

#[test]
fn every_row_has_same_session_and_is_invalid() {
    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), DRIVE);
    config.session_id = "not-a-uuid-but-accepted".to_string();

    convert(&config).unwrap();
    let sql = fs::read_to_string(&config.output_file).unwrap();

    for line in insert_lines(&sql) {
        assert!(line.contains("VALUES ('not-a-uuid-but-accepted', "));
        assert!(line.ends_with(", false);"));
    }
}

#[test]
fn malformed_time_aborts_without_output() {
    for bad in ["25:99:99", "12:30"] {
        let dir = tempdir().unwrap();
        let csv = format!("{}{},40.2,-75.3,2.5,99,1.2\n", DRIVE, bad);
        let config = config(dir.path(), &csv);

        match convert(&config) {
            Err(PipelineError::Transform(TransformError::TimestampParse { row, value, .. })) => {
                assert_eq!(row, 2);
                assert_eq!(value, bad);
            }
            other => panic!("expected TimestampParse for {:?}, got {:?}", bad, other),
        }
        assert!(!config.output_file.exists());
    }
}

#[test]
fn failed_run_keeps_previous_output() {
    let dir = tempdir().unwrap();
    let good = config(dir.path(), DRIVE);
    convert(&good).unwrap();
    let before = fs::read(&good.output_file).unwrap();

    let bad = config(dir.path(), "time,GPS1,GPS2,A,B,C\n08:15:00,north,-75.2,2.3,99,1.1\n");
    let err = convert(&bad).unwrap_err();
    assert!(matches!(err, PipelineError::Transform(TransformError::TypeCoercion { .. })));
    assert_eq!(err.exit_code(), 5);

    assert_eq!(fs::read(&good.output_file).unwrap(), before);
}

#[test]
fn successive_runs_overwrite() {
    let dir = tempdir().unwrap();
    let first = config(dir.path(), DRIVE);
    convert(&first).unwrap();

    let second = config(dir.path(), "time,GPS1,GPS2,A,B,C\n10:00:00,12.5,-70.1,3.0,0,4.2\n");
    convert(&second).unwrap();

    let sql = fs::read_to_string(&second.output_file).unwrap();
    let inserts = insert_lines(&sql);
    assert_eq!(inserts.len(), 1);
    assert!(inserts[0].ends_with("'2025-11-18 10:00:00', 12.5, -70.1, 3.0, 4.2, false);"));
    assert_eq!(sql.matches("BEGIN;").count(), 1);
}

#[test]
fn missing_input_is_data_source_error() {
    let dir = tempdir().unwrap();
    let config = ConvertConfig {
        input_file: dir.path().join("nope.csv"),
        output_file: dir.path().join("output.sql"),
        ..Default::default()
    };

    let err = convert(&config).unwrap_err();
    assert!(matches!(err, PipelineError::DataSource(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn ragged_csv_is_data_source_error() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), "time,GPS1,GPS2,A,B,C\n08:15:00,40.1,-75.2\n");

    let err = convert(&config).unwrap_err();
    assert!(matches!(err, PipelineError::DataSource(_)));
    assert!(!config.output_file.exists());
}

#[test]
fn unwritable_output_is_output_error() {
    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), DRIVE);
    config.output_file = dir.path().join("no-such-dir").join("output.sql");

    let err = convert(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Output(_)));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn strict_session_id_rejects_before_reading() {
    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), DRIVE);
    config.session_id = "drive-42".to_string();
    config.strict_session_id = true;

    let err = convert(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
    assert!(!config.output_file.exists());
}
