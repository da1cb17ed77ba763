// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use ledgerlens::analysis;
use ledgerlens::models::RawRecord;
use ledgerlens::utils::read_csv_records;
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn csv_and_json_inputs_agree() {
    let csv = "date,amount,category,merchant\n\
               2025-06-10,-150.00,Dining,Cafe\n\
               2025-05-05,-100.00,Dining,Cafe\n\
               2025-06-01,3000,Income,Employer\n";
    let from_csv = read_csv_records(csv.as_bytes()).unwrap();

    let from_json: Vec<RawRecord> = serde_json::from_value(json!([
        {"date": "2025-06-10", "amount": -150.00, "category": "Dining", "merchant": "Cafe"},
        {"date": "2025-05-05", "amount": -100.00, "category": "Dining", "merchant": "Cafe"},
        {"date": "2025-06-01", "amount": 3000, "category": "Income", "merchant": "Employer"},
    ]))
    .unwrap();

    let a = serde_json::to_string(&analysis::analyze_at(&from_csv, now())).unwrap();
    let b = serde_json::to_string(&analysis::analyze_at(&from_json, now())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn csv_fields_pass_through_the_normalizer() {
    let csv = "date,amount,category,merchant\n2025-06-10, -42.50 ,Dining,Cafe\n";
    let records = read_csv_records(csv.as_bytes()).unwrap();
    let txs = analysis::normalize(&records).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, -42.5);
    assert_eq!(txs[0].category, "Dining");
}

#[test]
fn csv_with_missing_columns_is_rejected() {
    let csv = "when,how_much\n2025-06-10,-42.50\n";
    assert!(read_csv_records(csv.as_bytes()).is_err());
}

#[test]
fn bad_csv_amount_surfaces_in_the_pipeline() {
    let csv = "date,amount,category,merchant\n2025-06-10,lots,Dining,Cafe\n";
    let records = read_csv_records(csv.as_bytes()).unwrap();
    let report = analysis::analyze_at(&records, now());
    assert!(!report.success);
    assert!(report.error.unwrap().contains("lots"));
}
