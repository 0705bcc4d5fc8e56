use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("sales_summary").unwrap();
    cmd.env_remove("LOG_FILE_PATH").env("RUST_LOG", "off");
    cmd
}

#[test]
fn prints_value_summary_to_stdout() {
    cmd()
        .arg(fixture("values.csv"))
        .assert()
        .success()
        .stdout("{\n  \"total_value\": 20.0,\n  \"average_value\": 5.0,\n  \"count_entries_with_value\": 2\n}\n");
}

#[test]
fn prints_header_only_summary_without_negative_zero() {
    cmd()
        .arg(fixture("values_header_only.csv"))
        .assert()
        .success()
        .stdout("{\n  \"total_value\": 0.0,\n  \"average_value\": 0.0,\n  \"count_entries_with_value\": 0\n}\n");
}

#[test]
fn extra_argument_exits_zero_with_error_summary() {
    cmd()
        .arg(fixture("values.csv"))
        .arg("unexpected.csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "{\n  \"error\": \"An unexpected error occurred during processing: invalid arguments: ",
        ))
        .stdout(predicate::str::contains("unexpected.csv"));
}

#[test]
fn dash_prefixed_input_exits_zero_with_error_summary() {
    cmd()
        .arg("-data.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid arguments"));
}

#[test]
fn help_prints_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "\"error\": \"File not found: {}\"",
            path.display()
        )));
}

#[test]
fn unrelated_columns_exit_zero_with_message() {
    cmd()
        .arg(fixture("unrelated.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"message\""));
}

#[test]
fn output_flag_writes_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("summary.json");

    cmd()
        .arg(fixture("sales.csv"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"processed_records\": 5"));
}

#[test]
fn unwritable_output_falls_back_to_stdout() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("no_such_dir").join("summary.json");

    cmd()
        .arg(fixture("sales.csv"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_revenue\": 29.0"));
}
