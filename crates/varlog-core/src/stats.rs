//! Summary statistics over a table, feeding the chart viewer.
//!
//! Days are UTC calendar days. Rows without an app name count toward the
//! daily totals but are left out of every per-app figure.

use crate::table::TableRow;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One slice of the app distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct AppShare {
    pub app: String,
    pub count: usize,
    /// Share of all rows that carry an app name, 0-100.
    pub percent: f64,
}

/// Row count per day.
pub fn daily_counts(rows: &[TableRow]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.timestamp.date_naive()).or_insert(0) += 1;
    }
    counts
}

/// Row count per app per day.
pub fn daily_counts_by_app(rows: &[TableRow]) -> BTreeMap<String, BTreeMap<NaiveDate, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<NaiveDate, usize>> = BTreeMap::new();
    for row in rows {
        let Some(app) = row.app_name.as_deref() else {
            continue;
        };
        *counts
            .entry(app.to_string())
            .or_default()
            .entry(row.timestamp.date_naive())
            .or_insert(0) += 1;
    }
    counts
}

/// Apps by descending count, ties broken by name.
pub fn app_distribution(rows: &[TableRow]) -> Vec<AppShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for app in rows.iter().filter_map(|row| row.app_name.as_deref()) {
        *counts.entry(app).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();

    let mut shares: Vec<AppShare> = counts
        .into_iter()
        .map(|(app, count)| AppShare {
            app: app.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.app.cmp(&b.app)));
    shares
}

/// Days whose row count is strictly above `threshold`.
pub fn busy_days(daily: &BTreeMap<NaiveDate, usize>, threshold: usize) -> Vec<NaiveDate> {
    daily
        .iter()
        .filter(|(_, count)| **count > threshold)
        .map(|(day, _)| *day)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
