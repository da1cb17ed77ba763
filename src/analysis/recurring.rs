// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Map};
use std::collections::BTreeMap;

use crate::models::{expense_view, Impact, Insight, InsightType, RecurringCharge, Transaction};
use crate::utils::slug;

/// Group expenses by merchant and cent-rounded amount; a pair that occurs at
/// least twice with an average gap of 20-40 days counts as recurring.
pub fn find_recurring(expenses: &[Transaction]) -> Vec<RecurringCharge> {
    let mut groups: BTreeMap<(&str, i64), Vec<NaiveDate>> = BTreeMap::new();
    for t in expenses {
        let cents = (t.amount * 100.0).round() as i64;
        groups
            .entry((t.merchant.as_str(), cents))
            .or_default()
            .push(t.date.date_naive());
    }

    let mut recurring = Vec::new();
    for ((merchant, cents), mut dates) in groups {
        if dates.len() < 2 {
            continue;
        }
        dates.sort();
        let gaps: Vec<f64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days() as f64)
            .collect();
        let avg_interval_days = gaps.iter().sum::<f64>() / gaps.len() as f64;
        if (20.0..=40.0).contains(&avg_interval_days) {
            recurring.push(RecurringCharge {
                merchant: merchant.to_string(),
                amount: cents as f64 / 100.0,
                frequency: dates.len(),
                avg_interval_days,
            });
        }
    }
    recurring
}

/// Alert on recurring charges whose earliest matching transaction falls
/// inside the last 30 days.
pub fn new_charges(txs: &[Transaction], now: DateTime<Utc>) -> Vec<Insight> {
    let expenses = expense_view(txs);
    let mut insights = Vec::new();
    let cutoff = now - Duration::days(30);

    for charge in find_recurring(&expenses) {
        let first_seen = expenses
            .iter()
            .filter(|t| t.merchant == charge.merchant && (t.amount - charge.amount).abs() < 1.0)
            .map(|t| t.date)
            .min();
        let Some(first_seen) = first_seen else {
            continue;
        };
        if first_seen < cutoff {
            continue;
        }
        let mut metadata = Map::new();
        metadata.insert("amount".into(), json!(charge.amount));
        metadata.insert("merchant".into(), json!(charge.merchant));
        metadata.insert("first_seen".into(), json!(first_seen.date_naive().to_string()));
        insights.push(Insight {
            id: format!("new-recurring-{}", slug(&charge.merchant)),
            r#type: InsightType::Alert,
            title: "New Recurring Charge".into(),
            description: format!(
                "New recurring charge of ${:.2} from {} detected. Verify this is authorized.",
                charge.amount, charge.merchant
            ),
            impact: Impact::Medium,
            confidence: 85.0,
            category: "Account Monitoring".into(),
            actionable: true,
            priority: 8,
            metadata,
        });
    }
    insights
}
