// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use serde_json::Map;

use crate::models::{
    HealthComponents, HealthScore, Impact, Insight, InsightType, Report,
};

// The fixed report shown when there is nothing to analyze or the pipeline
// failed. Values are literals, never derived from input.
static DEMO: Lazy<Report> = Lazy::new(|| Report {
    insights: vec![
        Insight {
            id: "demo-spending-trend".into(),
            r#type: InsightType::Prediction,
            title: "Monthly Spending Forecast".into(),
            description: "Based on current patterns, you're on track to spend $2,850 this month."
                .into(),
            impact: Impact::Medium,
            confidence: 82.0,
            category: "Budget Planning".into(),
            actionable: true,
            priority: 8,
            metadata: Map::new(),
        },
        Insight {
            id: "demo-subscription".into(),
            r#type: InsightType::Recommendation,
            title: "Subscription Optimization".into(),
            description: "You could save $47/month by reviewing and canceling unused subscriptions."
                .into(),
            impact: Impact::High,
            confidence: 94.0,
            category: "Cost Optimization".into(),
            actionable: true,
            priority: 9,
            metadata: Map::new(),
        },
        Insight {
            id: "demo-savings".into(),
            r#type: InsightType::Goal,
            title: "Improve Savings Rate".into(),
            description: "Increase monthly savings by $150 to reach the recommended 20% savings rate."
                .into(),
            impact: Impact::High,
            confidence: 85.0,
            category: "Savings Goals".into(),
            actionable: true,
            priority: 8,
            metadata: Map::new(),
        },
    ],
    health_score: HealthScore {
        overall: 7.8,
        components: HealthComponents {
            spending_control: 82,
            savings_rate: 75,
            budget_adherence: 79,
            financial_stability: 81,
            cash_flow_health: 77,
        },
        recommendations: vec![
            "Increase your savings rate to at least 15% of income".into(),
            "Consider investing surplus funds for long-term growth".into(),
            "Review monthly subscriptions for optimization opportunities".into(),
        ],
    },
    success: true,
    error: None,
});

pub fn report() -> Report {
    DEMO.clone()
}

/// Demo content with the failure attached; used when the pipeline errors.
pub fn failure(message: String) -> Report {
    Report {
        success: false,
        error: Some(message),
        ..DEMO.clone()
    }
}
