// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map};

use crate::models::{expense_view, Impact, Insight, InsightType, Transaction};
use crate::utils::slug;

/// Compare the last 30 days of spending against the 30 days before that,
/// overall and per category.
pub fn spending_trends(txs: &[Transaction], now: DateTime<Utc>) -> Vec<Insight> {
    let mut insights = Vec::new();
    let expenses = expense_view(txs);
    if expenses.is_empty() {
        return insights;
    }

    let recent_cutoff = now - Duration::days(30);
    let previous_cutoff = now - Duration::days(60);
    let recent: Vec<&Transaction> = expenses.iter().filter(|t| t.date >= recent_cutoff).collect();
    let previous: Vec<&Transaction> = expenses
        .iter()
        .filter(|t| t.date >= previous_cutoff && t.date < recent_cutoff)
        .collect();

    let recent_total: f64 = recent.iter().map(|t| t.amount).sum();
    let previous_total: f64 = previous.iter().map(|t| t.amount).sum();

    if !recent.is_empty() && !previous.is_empty() && previous_total > 0.0 {
        let change = (recent_total - previous_total) / previous_total * 100.0;
        if change.abs() > 15.0 {
            let rising = change > 0.0;
            let mut metadata = Map::new();
            metadata.insert("amount".into(), json!(recent_total));
            metadata.insert("change".into(), json!(change));
            metadata.insert("previous_amount".into(), json!(previous_total));
            insights.push(Insight {
                id: "spending-trend".into(),
                r#type: if rising {
                    InsightType::Alert
                } else {
                    InsightType::Prediction
                },
                title: format!(
                    "Spending {} by {:.1}%",
                    if rising { "Increased" } else { "Decreased" },
                    change.abs()
                ),
                description: format!(
                    "Your total spending has {} by ${:.2} compared to last month.",
                    if rising { "increased" } else { "decreased" },
                    (recent_total - previous_total).abs()
                ),
                impact: if change.abs() > 30.0 {
                    Impact::High
                } else {
                    Impact::Medium
                },
                confidence: (70.0 + change.abs()).min(95.0),
                category: "Spending Analysis".into(),
                actionable: rising,
                priority: if change.abs() > 30.0 { 9 } else { 7 },
                metadata,
            });
        }
    }

    // Per-category windows; name order keeps ties deterministic.
    let mut categories: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for t in &recent {
        categories.entry(t.category.as_str()).or_default().0 += t.amount;
    }
    for t in &previous {
        categories.entry(t.category.as_str()).or_default().1 += t.amount;
    }

    for (category, (cat_recent, cat_previous)) in categories {
        if cat_previous <= 0.0 || cat_recent <= 0.0 {
            continue;
        }
        let cat_change = (cat_recent - cat_previous) / cat_previous * 100.0;
        if cat_change.abs() <= 25.0 {
            continue;
        }
        let mut metadata = Map::new();
        metadata.insert("amount".into(), json!(cat_recent));
        metadata.insert("change".into(), json!(cat_change));
        insights.push(Insight {
            id: format!("category-trend-{}", slug(category)),
            r#type: if cat_change > 0.0 {
                InsightType::Recommendation
            } else {
                InsightType::Opportunity
            },
            title: format!("{category} Spending Alert"),
            description: format!(
                "Your {} spending has {} by {:.1}% this month.",
                category.to_lowercase(),
                if cat_change > 0.0 {
                    "increased"
                } else {
                    "decreased"
                },
                cat_change.abs()
            ),
            impact: Impact::Medium,
            confidence: 85.0,
            category: category.to_string(),
            actionable: true,
            priority: 6,
            metadata,
        });
    }

    insights
}
