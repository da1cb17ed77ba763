// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use serde_json::{json, Map};

use crate::analysis::recurring;
use crate::models::{expense_view, Impact, Insight, InsightType, Transaction};
use crate::utils::slug;

/// Surface the monthly subscription load and the single heaviest spending
/// category.
pub fn opportunities(txs: &[Transaction]) -> Vec<Insight> {
    let expenses = expense_view(txs);
    if expenses.is_empty() {
        return Vec::new();
    }
    let mut insights = Vec::new();

    let charges = recurring::find_recurring(&expenses);
    if !charges.is_empty() {
        let total: f64 = charges.iter().map(|c| c.amount).sum();
        let mut metadata = Map::new();
        metadata.insert("total_amount".into(), json!(total));
        metadata.insert("subscription_count".into(), json!(charges.len()));
        metadata.insert("subscriptions".into(), json!(charges));
        insights.push(Insight {
            id: "subscription-optimization".into(),
            r#type: InsightType::Recommendation,
            title: "Optimize Subscriptions".into(),
            description: format!(
                "You have {} recurring subscriptions totaling ${:.2}/month. Review and cancel unused ones.",
                charges.len(),
                total
            ),
            impact: if total > 100.0 {
                Impact::High
            } else {
                Impact::Medium
            },
            confidence: 95.0,
            category: "Cost Optimization".into(),
            actionable: true,
            priority: 9,
            metadata,
        });
    }

    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for t in &expenses {
        *by_category.entry(t.category.as_str()).or_insert(0.0) += t.amount;
    }
    // Strictly-greater keeps the alphabetically first category on ties.
    let mut top: Option<(&str, f64)> = None;
    for (&category, &total) in &by_category {
        if top.map_or(true, |(_, best)| total > best) {
            top = Some((category, total));
        }
    }

    if let Some((category, total)) = top {
        if total > 500.0 {
            let mut metadata = Map::new();
            metadata.insert("amount".into(), json!(total));
            metadata.insert("category".into(), json!(category));
            insights.push(Insight {
                id: format!("optimize-{}", slug(category)),
                r#type: InsightType::Opportunity,
                title: format!("Reduce {category} Spending"),
                description: format!(
                    "{category} is your highest spending category at ${total:.2}. Consider ways to reduce this expense."
                ),
                impact: Impact::Medium,
                confidence: 80.0,
                category: category.to_string(),
                actionable: true,
                priority: 6,
                metadata,
            });
        }
    }

    insights
}
