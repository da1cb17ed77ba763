// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Map};

use crate::models::{expense_view, Impact, Insight, InsightType, Transaction};
use crate::utils::{mean, quantile, sample_stddev};

/// Flag unusually expensive days and large individual transactions. Needs at
/// least 5 expense records to say anything.
pub fn detect(txs: &[Transaction], now: DateTime<Utc>) -> Vec<Insight> {
    let expenses = expense_view(txs);
    if expenses.len() < 5 {
        return Vec::new();
    }
    let mut insights = Vec::new();

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in &expenses {
        *daily.entry(t.date.date_naive()).or_insert(0.0) += t.amount;
    }

    if daily.len() >= 7 {
        let totals: Vec<f64> = daily.values().copied().collect();
        let daily_mean = mean(&totals).unwrap_or(0.0);
        if let Some(sd) = sample_stddev(&totals) {
            let threshold = daily_mean + 2.0 * sd;
            // Only the chronologically last outlier day is reported.
            if let Some((day, total)) = daily
                .iter()
                .filter(|(_, total)| **total > threshold)
                .next_back()
            {
                let deviation = (total / daily_mean - 1.0) * 100.0;
                let mut metadata = Map::new();
                metadata.insert("amount".into(), json!(total));
                metadata.insert("date".into(), json!(day.to_string()));
                metadata.insert("deviation_percent".into(), json!(deviation));
                insights.push(Insight {
                    id: "anomaly-spending".into(),
                    r#type: InsightType::Alert,
                    title: "Unusual Spending Detected".into(),
                    description: format!(
                        "You spent ${:.2} on {}, which is {:.0}% above your daily average.",
                        total, day, deviation
                    ),
                    impact: Impact::Medium,
                    confidence: 90.0,
                    category: "Budget Control".into(),
                    actionable: true,
                    priority: 8,
                    metadata,
                });
            }
        }
    }

    // Transactions above the 95th percentile of all expense magnitudes,
    // restricted to the last week.
    let magnitudes: Vec<f64> = expenses.iter().map(|t| t.amount).collect();
    let threshold = quantile(&magnitudes, 0.95);
    let week_ago = now - Duration::days(7);
    let largest = expenses
        .iter()
        .filter(|t| t.amount > threshold && t.date >= week_ago)
        .max_by(|a, b| a.amount.total_cmp(&b.amount));

    if let Some(largest) = largest {
        let mut metadata = Map::new();
        metadata.insert("amount".into(), json!(largest.amount));
        metadata.insert("merchant".into(), json!(largest.merchant));
        metadata.insert("category".into(), json!(largest.category));
        insights.push(Insight {
            id: "large-transaction".into(),
            r#type: InsightType::Alert,
            title: "Large Transaction Alert".into(),
            description: format!(
                "Large expense of ${:.2} detected at {} in {}.",
                largest.amount, largest.merchant, largest.category
            ),
            impact: Impact::Medium,
            confidence: 100.0,
            category: "Transaction Monitoring".into(),
            actionable: true,
            priority: 7,
            metadata,
        });
    }

    insights
}
