// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One transaction record as it arrives over the wire. Fields are kept loose
/// (`Value`) so that a structurally valid JSON file always decodes and bad
/// dates/amounts surface in the normalizer, where the pipeline fallback can
/// catch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub merchant: String,
}

/// A normalized transaction on the UTC timeline. Positive amounts are income,
/// negative amounts are expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub category: String,
    pub merchant: String,
}

/// Expenses only, sign-flipped to positive magnitude. Analyzers derive this
/// view on demand rather than sharing a cached copy.
pub fn expense_view(txs: &[Transaction]) -> Vec<Transaction> {
    txs.iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| Transaction {
            amount: -t.amount,
            ..t.clone()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Alert,
    Prediction,
    Recommendation,
    Opportunity,
    Goal,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Alert => "alert",
            InsightType::Prediction => "prediction",
            InsightType::Recommendation => "recommendation",
            InsightType::Opportunity => "opportunity",
            InsightType::Goal => "goal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub r#type: InsightType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub confidence: f64,
    pub category: String,
    pub actionable: bool,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// A merchant/amount pair that recurs on a roughly monthly cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub merchant: String,
    pub amount: f64,
    pub frequency: usize,
    #[serde(rename = "avgIntervalDays")]
    pub avg_interval_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthComponents {
    #[serde(rename = "spendingControl")]
    pub spending_control: u32,
    #[serde(rename = "savingsRate")]
    pub savings_rate: u32,
    #[serde(rename = "budgetAdherence")]
    pub budget_adherence: u32,
    #[serde(rename = "financialStability")]
    pub financial_stability: u32,
    #[serde(rename = "cashFlowHealth")]
    pub cash_flow_health: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    pub overall: f64,
    pub components: HealthComponents,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub insights: Vec<Insight>,
    #[serde(rename = "healthScore")]
    pub health_score: HealthScore,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
