// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{expense_view, HealthComponents, HealthScore, Transaction};
use crate::utils::coeff_of_variation;

/// Five weighted sub-scores on a 0-100 scale collapsed into one 0-10 display
/// score, plus up to three recommendations.
pub fn score(txs: &[Transaction]) -> HealthScore {
    let income: f64 = txs.iter().filter(|t| t.amount > 0.0).map(|t| t.amount).sum();
    let expense_total: f64 = txs
        .iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| -t.amount)
        .sum();

    let spending_control = spending_control_score(txs);
    let savings_rate = savings_rate_score(income, expense_total);
    let budget_adherence = budget_adherence_score(txs);
    let financial_stability = stability_score(txs);
    let cash_flow_health = cash_flow_score(income, expense_total);

    let overall = spending_control * 0.25
        + savings_rate * 0.25
        + budget_adherence * 0.20
        + financial_stability * 0.15
        + cash_flow_health * 0.15;

    HealthScore {
        overall: overall.round() / 10.0,
        components: HealthComponents {
            spending_control: spending_control.round() as u32,
            savings_rate: savings_rate.round() as u32,
            budget_adherence: budget_adherence.round() as u32,
            financial_stability: financial_stability.round() as u32,
            cash_flow_health: cash_flow_health.round() as u32,
        },
        recommendations: recommendations(
            overall,
            spending_control,
            savings_rate,
            budget_adherence,
            financial_stability,
            cash_flow_health,
        ),
    }
}

/// Volatility of individual expense magnitudes. Fixed 75 with fewer than 3
/// expenses.
fn spending_control_score(txs: &[Transaction]) -> f64 {
    let magnitudes: Vec<f64> = expense_view(txs).iter().map(|t| t.amount).collect();
    if magnitudes.len() < 3 {
        return 75.0;
    }
    (100.0 - coeff_of_variation(&magnitudes) * 50.0).clamp(0.0, 100.0)
}

/// 20% saved scores 100; no income scores 0.
fn savings_rate_score(income: f64, expenses: f64) -> f64 {
    if income <= 0.0 {
        return 0.0;
    }
    let savings_rate = (income - expenses) / income * 100.0;
    (savings_rate * 5.0).clamp(0.0, 100.0)
}

/// Consistency of daily expense totals. Fixed 70 with fewer than 7 expense
/// records.
fn budget_adherence_score(txs: &[Transaction]) -> f64 {
    let expenses = expense_view(txs);
    if expenses.len() < 7 {
        return 70.0;
    }
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in &expenses {
        *daily.entry(t.date.date_naive()).or_insert(0.0) += t.amount;
    }
    let totals: Vec<f64> = daily.values().copied().collect();
    (100.0 - coeff_of_variation(&totals) * 30.0).clamp(0.0, 100.0)
}

/// Consistency of monthly expense totals on the timezone-stripped calendar.
/// Fixed 70 with fewer than 2 months.
fn stability_score(txs: &[Transaction]) -> f64 {
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for t in expense_view(txs) {
        let d = t.date.naive_utc().date();
        *monthly.entry((d.year(), d.month())).or_insert(0.0) += t.amount;
    }
    if monthly.len() < 2 {
        return 70.0;
    }
    let totals: Vec<f64> = monthly.values().copied().collect();
    (100.0 - coeff_of_variation(&totals) * 40.0).clamp(0.0, 100.0)
}

/// Piecewise on the expense-to-income ratio.
fn cash_flow_score(income: f64, expenses: f64) -> f64 {
    if income <= 0.0 {
        return 0.0;
    }
    let ratio = expenses / income;
    if ratio <= 0.7 {
        100.0
    } else if ratio <= 0.8 {
        85.0
    } else if ratio <= 0.9 {
        70.0
    } else if ratio <= 1.0 {
        50.0
    } else {
        (50.0 - (ratio - 1.0) * 100.0).clamp(0.0, 50.0)
    }
}

/// All six guards are evaluated against the unrounded scores; the first three
/// that fire, in this order, make the list.
fn recommendations(
    overall: f64,
    spending_control: f64,
    savings_rate: f64,
    budget_adherence: f64,
    financial_stability: f64,
    cash_flow_health: f64,
) -> Vec<String> {
    let mut recs = Vec::new();
    if savings_rate < 50.0 {
        recs.push("Increase your savings rate to at least 10-15% of income".to_string());
    }
    if spending_control < 70.0 {
        recs.push("Work on reducing spending volatility by creating a budget".to_string());
    }
    if budget_adherence < 70.0 {
        recs.push("Improve budget adherence by tracking daily expenses".to_string());
    }
    if financial_stability < 70.0 {
        recs.push("Focus on creating more consistent monthly spending patterns".to_string());
    }
    if cash_flow_health < 60.0 {
        recs.push("Review and reduce monthly expenses to improve cash flow".to_string());
    }
    if overall > 80.0 {
        recs.push("Great job! Consider investing surplus funds for long-term growth".to_string());
    }
    recs.truncate(3);
    recs
}
