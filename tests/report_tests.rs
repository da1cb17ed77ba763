// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ledgerlens::analysis;
use ledgerlens::models::RawRecord;
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn raw(days_ago: i64, amount: f64, category: &str, merchant: &str) -> RawRecord {
    RawRecord {
        date: json!((now() - Duration::days(days_ago)).to_rfc3339()),
        amount: json!(amount),
        category: category.to_string(),
        merchant: merchant.to_string(),
    }
}

/// A batch busy enough to trip most analyzers at once.
fn busy_batch() -> Vec<RawRecord> {
    let mut records = vec![raw(80, 4000.0, "Income", "Employer"), raw(20, 4000.0, "Income", "Employer")];
    for d in [95, 85, 75, 65, 55, 45, 35, 25, 15, 5] {
        records.push(raw(d, -250.0, "Groceries", "Store"));
    }
    records.push(raw(70, -15.0, "Entertainment", "Netflix"));
    records.push(raw(38, -15.0, "Entertainment", "Netflix"));
    records.push(raw(6, -15.0, "Entertainment", "Netflix"));
    records.push(raw(2, -900.0, "Electronics", "TechShop"));
    records.push(raw(42, -120.0, "Dining", "Cafe"));
    records.push(raw(4, -260.0, "Dining", "Cafe"));
    records
}

#[test]
fn empty_input_returns_demo_report() {
    let report = analysis::analyze_at(&[], now());
    assert!(report.success);
    assert!(report.error.is_none());
    let ids: Vec<&str> = report.insights.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["demo-spending-trend", "demo-subscription", "demo-savings"]);
    assert_eq!(report.health_score.overall, 7.8);
}

#[test]
fn malformed_record_falls_back_with_error() {
    let bad = RawRecord {
        date: json!("not-a-date"),
        amount: json!("x"),
        category: "c".to_string(),
        merchant: "m".to_string(),
    };
    let report = analysis::analyze_at(&[bad], now());
    assert!(!report.success);
    assert!(!report.error.as_deref().unwrap_or("").is_empty());

    // Content apart from the error is exactly the demo report's.
    let demo = analysis::analyze_at(&[], now());
    assert_eq!(
        serde_json::to_value(&report.insights).unwrap(),
        serde_json::to_value(&demo.insights).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&report.health_score).unwrap(),
        serde_json::to_value(&demo.health_score).unwrap()
    );
}

#[test]
fn insights_are_ranked_and_capped() {
    let report = analysis::analyze_at(&busy_batch(), now());
    assert!(report.success);
    assert!(report.insights.len() <= 8);
    for pair in report.insights.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority > b.priority
                || (a.priority == b.priority && a.confidence >= b.confidence),
            "{} ranked above {} out of order",
            a.id,
            b.id
        );
    }
}

#[test]
fn frozen_clock_makes_output_reproducible() {
    let records = busy_batch();
    let a = serde_json::to_string(&analysis::analyze_at(&records, now())).unwrap();
    let b = serde_json::to_string(&analysis::analyze_at(&records, now())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_ranked_insight_carries_metadata() {
    let report = analysis::analyze_at(&busy_batch(), now());
    for i in &report.insights {
        assert!(!i.metadata.is_empty(), "{} has no metadata", i.id);
        assert!(i.confidence >= 0.0 && i.confidence <= 100.0);
    }
}

#[test]
fn category_trend_scenario_end_to_end() {
    // Dining: $200 in days 31-60, $300 in the last 30 days.
    let records = vec![
        raw(80, 3000.0, "Income", "Employer"),
        raw(40, -100.0, "Dining", "Cafe"),
        raw(50, -100.0, "Dining", "Cafe"),
        raw(5, -150.0, "Dining", "Cafe"),
        raw(10, -150.0, "Dining", "Cafe"),
    ];
    let report = analysis::analyze_at(&records, now());
    let cat = report
        .insights
        .iter()
        .find(|i| i.id == "category-trend-dining")
        .unwrap();
    assert_eq!(cat.confidence, 85.0);
    assert_eq!(cat.priority, 6);
}

#[test]
fn epoch_and_naive_dates_normalize() {
    let records = vec![
        RawRecord {
            date: json!(1750000000),
            amount: json!(-12.5),
            category: "Dining".to_string(),
            merchant: "Cafe".to_string(),
        },
        RawRecord {
            date: json!("2025-06-01"),
            amount: json!("100.0"),
            category: "Income".to_string(),
            merchant: "Employer".to_string(),
        },
    ];
    let txs = analysis::normalize(&records).unwrap();
    assert_eq!(txs[0].amount, -12.5);
    assert_eq!(txs[1].date, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
}

#[test]
fn analyze_value_rejects_non_arrays() {
    let report = analysis::analyze_value(&json!({"date": "2025-01-01"}), now());
    assert!(!report.success);
    assert!(report.error.is_some());
}

#[test]
fn analyze_json_rejects_bad_text() {
    let report = analysis::analyze_json("this is not json", now());
    assert!(!report.success);

    let report = analysis::analyze_json("[]", now());
    assert!(report.success);
    assert_eq!(report.insights.len(), 3);
}
