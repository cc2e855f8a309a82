//! Chart-ready series computed once from a loaded table.
//!
//! The x axis of every line chart is the day offset from the first day in
//! the table. Series are sparse: only days with records get a point, plus a
//! zero point at each edge of a gap so gaps show as dips rather than
//! straight interpolated lines. Point counts grow with the number of
//! distinct days, never with the width of the span.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use varlog_core::stats::{self, AppShare};
use varlog_core::TableRow;

/// Label for the bucket collecting apps beyond the display limit.
pub const OTHER_APPS: &str = "other";

/// One app's per-day counts, sparse over the day span.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSeries {
    pub app: String,
    pub total: usize,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub first_day: Option<NaiveDate>,
    /// Inclusive span from first to last day.
    pub span_days: usize,
    pub total: usize,
    pub daily: Vec<(f64, f64)>,
    pub busy_days: Vec<NaiveDate>,
    pub threshold: usize,
    /// Busiest apps first.
    pub per_app: Vec<AppSeries>,
    /// At most `max_apps` entries plus [`OTHER_APPS`] when anything was cut.
    pub shares: Vec<AppShare>,
}

impl ChartData {
    pub fn from_rows(rows: &[TableRow], threshold: usize, max_apps: usize) -> Self {
        let daily = stats::daily_counts(rows);
        let (Some(first), Some(last)) = (
            daily.keys().next().copied(),
            daily.keys().next_back().copied(),
        ) else {
            return Self {
                threshold,
                ..Self::default()
            };
        };
        let span_days = (last - first).num_days() as usize + 1;

        let all_shares = stats::app_distribution(rows);
        let by_app = stats::daily_counts_by_app(rows);
        let per_app = all_shares
            .iter()
            .take(max_apps)
            .filter_map(|share| {
                let counts = by_app.get(&share.app)?;
                Some(AppSeries {
                    app: share.app.clone(),
                    total: share.count,
                    points: fill_span(counts, first, span_days),
                })
            })
            .collect();

        Self {
            first_day: Some(first),
            span_days,
            total: rows.len(),
            daily: fill_span(&daily, first, span_days),
            busy_days: stats::busy_days(&daily, threshold),
            threshold,
            per_app,
            shares: fold_tail(all_shares, max_apps),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The day an x value falls on.
    pub fn day_at(&self, x: f64) -> Option<NaiveDate> {
        let first = self.first_day?;
        first.checked_add_signed(Duration::days(x.round() as i64))
    }

    /// Points of the daily series on busy days.
    pub fn busy_points(&self) -> Vec<(f64, f64)> {
        let threshold = self.threshold as f64;
        self.daily
            .iter()
            .copied()
            .filter(|(_, count)| *count > threshold)
            .collect()
    }

    pub fn max_daily(&self) -> f64 {
        self.daily.iter().map(|(_, y)| *y).fold(0.0, f64::max)
    }

    pub fn max_per_app(&self) -> f64 {
        self.per_app
            .iter()
            .flat_map(|series| series.points.iter().map(|(_, y)| *y))
            .fold(0.0, f64::max)
    }
}

/// `log10(1 + y)` when `log` is set, so zero days stay on the axis.
pub fn scale(y: f64, log: bool) -> f64 {
    if log {
        y.ln_1p() / std::f64::consts::LN_10
    } else {
        y
    }
}

/// Inverse of [`scale`], for axis labels.
pub fn unscale(y: f64, log: bool) -> f64 {
    if log {
        10f64.powf(y) - 1.0
    } else {
        y
    }
}

fn fill_span(counts: &BTreeMap<NaiveDate, usize>, first: NaiveDate, span_days: usize) -> Vec<(f64, f64)> {
    let last = span_days as i64 - 1;
    let mut points = Vec::with_capacity(counts.len() * 3 + 2);

    let mut next = 0;
    for (day, count) in counts {
        let offset = (*day - first).num_days();
        zero_run(&mut points, next, offset - 1);
        points.push((offset as f64, *count as f64));
        next = offset + 1;
    }
    zero_run(&mut points, next, last);
    points
}

/// Both ends of an empty run of days, which is all a line chart needs.
fn zero_run(points: &mut Vec<(f64, f64)>, from: i64, to: i64) {
    if from <= to {
        points.push((from as f64, 0.0));
    }
    if from < to {
        points.push((to as f64, 0.0));
    }
}

fn fold_tail(mut shares: Vec<AppShare>, max_apps: usize) -> Vec<AppShare> {
    if shares.len() <= max_apps {
        return shares;
    }
    let tail = shares.split_off(max_apps);
    shares.push(AppShare {
        app: OTHER_APPS.to_string(),
        count: tail.iter().map(|s| s.count).sum(),
        percent: tail.iter().map(|s| s.percent).sum(),
    });
    shares
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
