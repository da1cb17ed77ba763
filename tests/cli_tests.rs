// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_file(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn missing_argument_prints_error_object() {
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .assert()
        .failure()
        .stdout(predicate::str::contains("Transaction data file path required"));
}

#[test]
fn missing_file_prints_error_object() {
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg("/no/such/file.json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Transaction data file not found"));
}

#[test]
fn invalid_json_file_is_a_wrapper_error() {
    let f = write_file("{{{ nope");
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg(f.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid JSON"));
}

#[test]
fn empty_array_prints_demo_report() {
    let f = write_file("[]");
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo-spending-trend"))
        .stdout(predicate::str::contains("\"healthScore\""))
        .stdout(predicate::str::contains("\"success\":true"));
}

#[test]
fn byte_order_mark_is_tolerated() {
    let f = write_file("\u{feff}[]");
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo-spending-trend"));
}

#[test]
fn malformed_records_still_exit_zero() {
    let f = write_file(r#"[{"date": "not-a-date", "amount": "x", "category": "c", "merchant": "m"}]"#);
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":false"))
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn pinned_clock_gives_reproducible_output() {
    let data = r#"[
        {"date": "2025-06-10", "amount": -300.0, "category": "Dining", "merchant": "Cafe"},
        {"date": "2025-05-01", "amount": -200.0, "category": "Dining", "merchant": "Cafe"},
        {"date": "2025-06-01", "amount": 3000, "category": "Income", "merchant": "Employer"}
    ]"#;
    let f = write_file(data);
    let run = || {
        Command::cargo_bin("ledgerlens")
            .unwrap()
            .arg(f.path())
            .args(["--as-of", "2025-06-15T12:00:00Z"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn csv_input_and_table_output() {
    let f = write_file("date,amount,category,merchant\n2025-06-10,-42.50,Dining,Cafe\n");
    Command::cargo_bin("ledgerlens")
        .unwrap()
        .arg(f.path())
        .args(["--format", "csv", "--table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Component"))
        .stdout(predicate::str::contains("Overall (0-10)"));
}
