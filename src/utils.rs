// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use serde::Deserialize;
use serde_json::Value;

use crate::models::RawRecord;

/// Coerce a wire value into a UTC timestamp. Naive dates and datetimes are
/// labeled UTC; offset-carrying strings are converted to UTC; numbers are
/// epoch seconds.
pub fn parse_timestamp(v: &Value) -> Result<DateTime<Utc>> {
    match v {
        Value::Number(n) => {
            let secs = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| anyhow!("Invalid epoch timestamp '{}'", n))?;
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| anyhow!("Epoch timestamp '{}' out of range", secs))
        }
        Value::String(s) => parse_timestamp_str(s.trim()),
        other => Err(anyhow!("Invalid date '{}', expected string or number", other)),
    }
}

fn parse_timestamp_str(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(nd) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(nd.and_hms_opt(0, 0, 0).unwrap().and_utc());
        }
    }
    Err(anyhow!(
        "Invalid date '{}', expected ISO date/datetime or epoch seconds",
        s
    ))
}

/// Coerce a wire value into a finite amount. Numeric strings are accepted.
pub fn parse_amount(v: &Value) -> Result<f64> {
    let amt = match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| anyhow!("Invalid amount '{}'", n))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow!("Invalid amount '{}'", s))?,
        other => return Err(anyhow!("Invalid amount '{}', expected number", other)),
    };
    if amt.is_finite() {
        Ok(amt)
    } else {
        Err(anyhow!("Non-finite amount '{}'", amt))
    }
}

/// Lowercase with spaces hyphenated, for insight ids derived from labels.
pub fn slug(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (ddof = 1). Undefined for fewer than 2 values.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Standard deviation over mean, the consistency proxy used by the health
/// scorer. Degrades to the worst case 1.0 when the mean is non-positive or
/// the deviation is undefined.
pub fn coeff_of_variation(values: &[f64]) -> f64 {
    match (sample_stddev(values), mean(values)) {
        (Some(sd), Some(m)) if m > 0.0 => sd / m,
        _ => 1.0,
    }
}

/// q-th quantile with linear interpolation between order statistics.
/// `values` must be non-empty; `q` in [0, 1].
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let h = q * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if lo + 1 < sorted.len() {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Ordinary least-squares slope of `values` against their indices 0..n-1.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    if den > 0.0 { num / den } else { 0.0 }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    merchant: String,
}

/// Read headered `date,amount,category,merchant` rows into raw records; the
/// normalizer does the coercion, same as for JSON input.
pub fn read_csv_records<R: std::io::Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        let row = row.context("Invalid CSV row in transaction data")?;
        records.push(RawRecord {
            date: Value::String(row.date),
            amount: Value::String(row.amount),
            category: row.category,
            merchant: row.merchant,
        });
    }
    Ok(records)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}
