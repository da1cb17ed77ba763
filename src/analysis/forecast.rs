// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde_json::{json, Map};

use crate::models::{expense_view, Impact, Insight, InsightType, Transaction};
use crate::utils::ols_slope;

/// Fit a linear trend on monthly expense totals and project the next month.
/// Month buckets are taken on the timezone-stripped calendar to avoid
/// boundary-shift artifacts.
pub fn project(txs: &[Transaction]) -> Vec<Insight> {
    let expenses = expense_view(txs);
    if expenses.is_empty() {
        return Vec::new();
    }

    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for t in &expenses {
        let d = t.date.naive_utc().date();
        *monthly.entry((d.year(), d.month())).or_insert(0.0) += t.amount;
    }
    if monthly.len() < 2 {
        return Vec::new();
    }
    let totals: Vec<f64> = monthly.values().copied().collect();
    if totals.len() < 3 {
        // Two months is enough to aggregate but not to call a trend.
        return Vec::new();
    }

    let trend = ols_slope(&totals);
    let last_month = *totals.last().unwrap();
    let predicted = last_month + trend;
    if trend.abs() <= 100.0 {
        return Vec::new();
    }

    let step = trend.abs() as i64;
    let mut metadata = Map::new();
    metadata.insert("predicted_amount".into(), json!(predicted));
    metadata.insert("trend".into(), json!(trend));
    metadata.insert("last_month_amount".into(), json!(last_month));
    vec![Insight {
        id: "spending-prediction".into(),
        r#type: InsightType::Prediction,
        title: "Monthly Spending Forecast".into(),
        description: format!(
            "Based on your recent patterns, you're projected to spend ${:.0} next month, a ${} {}.",
            predicted,
            step,
            if trend > 0.0 { "increase" } else { "decrease" }
        ),
        impact: if trend.abs() > 300.0 {
            Impact::High
        } else {
            Impact::Medium
        },
        confidence: 75.0,
        category: "Budget Planning".into(),
        actionable: trend > 0.0,
        priority: if trend > 0.0 { 8 } else { 6 },
        metadata,
    }]
}
