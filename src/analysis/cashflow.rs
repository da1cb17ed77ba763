// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::{json, Map};

use crate::models::{Impact, Insight, InsightType, Transaction};

/// Savings rate from total income vs. total expense. At most one of the two
/// branches fires; nothing is said for a rate between 10% and 30% or when
/// there is no income.
pub fn review(txs: &[Transaction]) -> Vec<Insight> {
    let income: f64 = txs.iter().filter(|t| t.amount > 0.0).map(|t| t.amount).sum();
    let expenses: f64 = txs
        .iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| -t.amount)
        .sum();
    if income <= 0.0 {
        return Vec::new();
    }

    let savings_rate = (income - expenses) / income * 100.0;

    if savings_rate < 10.0 {
        let mut metadata = Map::new();
        metadata.insert("current_rate".into(), json!(savings_rate));
        metadata.insert("target_rate".into(), json!(20));
        metadata.insert("monthly_income".into(), json!(income));
        metadata.insert("monthly_expenses".into(), json!(expenses));
        vec![Insight {
            id: "low-savings-rate".into(),
            r#type: InsightType::Goal,
            title: "Improve Savings Rate".into(),
            description: format!(
                "Your current savings rate is {savings_rate:.1}%. Aim for at least 10-20% to build financial security."
            ),
            impact: Impact::High,
            confidence: 100.0,
            category: "Savings Goals".into(),
            actionable: true,
            priority: 9,
            metadata,
        }]
    } else if savings_rate > 30.0 {
        let mut metadata = Map::new();
        metadata.insert("savings_rate".into(), json!(savings_rate));
        metadata.insert("surplus_amount".into(), json!(income - expenses));
        vec![Insight {
            id: "high-savings-rate".into(),
            r#type: InsightType::Opportunity,
            title: "Excellent Savings Rate".into(),
            description: format!(
                "Your savings rate of {savings_rate:.1}% is excellent! Consider investing surplus funds for growth."
            ),
            impact: Impact::Medium,
            confidence: 100.0,
            category: "Investment Opportunity".into(),
            actionable: true,
            priority: 5,
            metadata,
        }]
    } else {
        Vec::new()
    }
}
