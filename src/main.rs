// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use ledgerlens::models::Report;
use ledgerlens::{analysis, cli, utils};

fn main() {
    let matches = cli::build_cli().get_matches();
    if let Err(e) = run(&matches) {
        // Wrapper-level failures come out as an error object, not a report.
        println!("{}", serde_json::json!({ "error": e.to_string() }));
        std::process::exit(1);
    }
}

fn run(m: &clap::ArgMatches) -> Result<()> {
    let path = m
        .get_one::<String>("path")
        .ok_or_else(|| anyhow!("Transaction data file path required as argument"))?;

    let now = match m.get_one::<String>("as-of") {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --as-of timestamp '{}'", s))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Transaction data file not found: {}", path))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let report = match m.get_one::<String>("format").map(String::as_str) {
        Some("csv") => {
            let records = utils::read_csv_records(text.as_bytes())
                .with_context(|| format!("Invalid CSV in transaction data file: {}", path))?;
            analysis::analyze_at(&records, now)
        }
        _ => {
            let data: serde_json::Value = serde_json::from_str(text)
                .with_context(|| format!("Invalid JSON in transaction data file: {}", path))?;
            analysis::analyze_value(&data, now)
        }
    };

    if m.get_flag("table") {
        print_tables(&report);
    } else {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn print_tables(report: &Report) {
    let insight_rows = report
        .insights
        .iter()
        .map(|i| {
            vec![
                i.priority.to_string(),
                format!("{:.0}", i.confidence),
                i.r#type.as_str().to_string(),
                i.impact.as_str().to_string(),
                i.title.clone(),
                i.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        utils::pretty_table(
            &["Priority", "Confidence", "Type", "Impact", "Title", "Category"],
            insight_rows
        )
    );

    let c = &report.health_score.components;
    let score_rows = vec![
        vec!["Spending control".into(), c.spending_control.to_string()],
        vec!["Savings rate".into(), c.savings_rate.to_string()],
        vec!["Budget adherence".into(), c.budget_adherence.to_string()],
        vec!["Financial stability".into(), c.financial_stability.to_string()],
        vec!["Cash flow health".into(), c.cash_flow_health.to_string()],
        vec![
            "Overall (0-10)".into(),
            format!("{:.1}", report.health_score.overall),
        ],
    ];
    println!("{}", utils::pretty_table(&["Component", "Score"], score_rows));

    for rec in &report.health_score.recommendations {
        println!("- {}", rec);
    }
}
