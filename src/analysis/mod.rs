// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod anomalies;
pub mod cashflow;
pub mod demo;
pub mod forecast;
pub mod health;
pub mod patterns;
pub mod recurring;
pub mod savings;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::models::{RawRecord, Report, Transaction};
use crate::utils::{parse_amount, parse_timestamp};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("transaction {index}: {message}")]
    Record { index: usize, message: String },
    #[error("invalid transaction data: {0}")]
    Shape(String),
}

/// Parse raw records into the canonical UTC table. Any unparseable date or
/// amount fails the whole batch.
pub fn normalize(records: &[RawRecord]) -> Result<Vec<Transaction>, AnalysisError> {
    records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            let date = parse_timestamp(&r.date).map_err(|e| AnalysisError::Record {
                index,
                message: e.to_string(),
            })?;
            let amount = parse_amount(&r.amount).map_err(|e| AnalysisError::Record {
                index,
                message: e.to_string(),
            })?;
            Ok(Transaction {
                date,
                amount,
                category: r.category.clone(),
                merchant: r.merchant.clone(),
            })
        })
        .collect()
}

/// Run every analyzer over a non-empty batch and assemble the ranked report.
/// The health score is computed from the full data, independent of which
/// insights survive the cut to eight.
pub fn evaluate(records: &[RawRecord], now: DateTime<Utc>) -> Result<Report, AnalysisError> {
    let txs = normalize(records)?;

    let mut insights = Vec::new();
    insights.extend(patterns::spending_trends(&txs, now));
    insights.extend(anomalies::detect(&txs, now));
    insights.extend(forecast::project(&txs));
    insights.extend(savings::opportunities(&txs));
    insights.extend(cashflow::review(&txs));
    insights.extend(recurring::new_charges(&txs, now));

    let health_score = health::score(&txs);

    // Stable sort: priority first, confidence breaks ties, emission order
    // breaks the rest.
    insights.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    insights.truncate(8);

    Ok(Report {
        insights,
        health_score,
        success: true,
        error: None,
    })
}

/// The single-shot contract: empty input yields the demo report as-is, a
/// failed pipeline yields the demo report marked unsuccessful with the
/// failure attached.
pub fn analyze_at(records: &[RawRecord], now: DateTime<Utc>) -> Report {
    if records.is_empty() {
        return demo::report();
    }
    match evaluate(records, now) {
        Ok(report) => report,
        Err(e) => demo::failure(e.to_string()),
    }
}

pub fn analyze(records: &[RawRecord]) -> Report {
    analyze_at(records, Utc::now())
}

/// Entry point for already-decoded JSON. Shape problems (not an array,
/// elements that are not objects) are pipeline failures, not caller errors.
pub fn analyze_value(data: &Value, now: DateTime<Utc>) -> Report {
    let items = match data.as_array() {
        Some(items) => items,
        None => {
            return demo::failure(
                AnalysisError::Shape("expected an array of transaction records".into())
                    .to_string(),
            );
        }
    };
    let records = match items
        .iter()
        .map(|v| serde_json::from_value(v.clone()))
        .collect::<Result<Vec<RawRecord>, _>>()
    {
        Ok(records) => records,
        Err(e) => return demo::failure(AnalysisError::Shape(e.to_string()).to_string()),
    };
    analyze_at(&records, now)
}

/// JSON-text convenience entry, kept for callers that hand over the raw
/// payload instead of decoding it first.
pub fn analyze_json(text: &str, now: DateTime<Utc>) -> Report {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => analyze_value(&v, now),
        Err(e) => demo::failure(AnalysisError::Shape(e.to_string()).to_string()),
    }
}
