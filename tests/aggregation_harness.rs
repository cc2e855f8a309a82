#![allow(unused)]
//! Aggregation and statistics harness.
//!
//! # What this covers
//!
//! - **Global ordering**: batches pushed in any order come out ascending by
//!   timestamp. Verified with proptest over random batch shapes.
//! - **Stability**: records sharing a timestamp keep insertion order, both in
//!   the proptest and across two files of the sample archive that log the
//!   same second.
//! - **Statistics over the sample archive**: daily counts, per-app daily
//!   counts, the app distribution (descending, ties by name, app-less rows
//!   excluded) and busy days.
//!
//! # What this does NOT cover
//!
//! - Chart rendering of these figures (unit tests in `varlog-tui`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test aggregation_harness
//! ```

mod common;
use common::*;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use varlog_core::{stats, Aggregator, LogRecord, Router, TableRow};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(YEAR, m, d).unwrap()
}

fn sample_rows() -> Vec<TableRow> {
    let tree = sample_tree();
    let report = varlog_feeds::ingest(tree.path(), &Router::default(), &options()).unwrap();
    report.table().into_rows()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn finish_is_a_stable_sort(
        batches in prop::collection::vec(prop::collection::vec(0i64..50, 0..20), 0..6)
    ) {
        let mut aggregator = Aggregator::new();
        let mut expected = Vec::new();
        for (b, batch) in batches.iter().enumerate() {
            let records: Vec<LogRecord> = batch
                .iter()
                .enumerate()
                .map(|(i, secs)| RecordBuilder::at_secs(*secs).raw(&format!("{b}:{i}")).build())
                .collect();
            expected.extend(records.iter().map(|r| (r.timestamp, r.raw.clone())));
            aggregator.extend(records);
        }
        prop_assert_eq!(aggregator.len(), expected.len());

        // `sort_by_key` is stable, so this is the reference order.
        expected.sort_by_key(|(ts, _)| *ts);
        let got: Vec<_> = aggregator
            .finish()
            .into_iter()
            .map(|r| (r.timestamp, r.raw))
            .collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn empty_aggregator_finishes_empty() {
    let aggregator = Aggregator::new();
    assert!(aggregator.is_empty());
    assert!(aggregator.finish().is_empty());
}

#[test]
fn sample_archive_is_globally_ordered() {
    let tree = sample_tree();
    let report = varlog_feeds::ingest(tree.path(), &Router::default(), &options()).unwrap();
    assert_eq!(report.records.len(), SAMPLE_RECORDS);
    assert_sorted(&report.records);

    let first = report.records.first().unwrap();
    let last = report.records.last().unwrap();
    assert_eq!(first.raw, CORPUS_CRON_ROTATED[0]);
    assert_eq!(last.raw, CORPUS_WEB_ACCESS[1]);
}

#[test]
fn same_second_across_files_keeps_walk_order() {
    let tree = sample_tree();
    let report = varlog_feeds::ingest(tree.path(), &Router::default(), &options()).unwrap();
    let at_five: Vec<&str> = report
        .records
        .iter()
        .filter(|r| r.timestamp == utc(YEAR, 2, 28, 17, 0, 0))
        .map(|r| r.raw.as_str())
        .collect();
    // httpd/ is walked before squid/.
    assert_eq!(at_five, vec![CORPUS_WEB_ACCESS[0], CORPUS_PROXY_USERAGENT[0]]);
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn daily_counts_over_sample() {
    let daily = stats::daily_counts(&sample_rows());
    let got: Vec<(NaiveDate, usize)> = daily.into_iter().collect();
    assert_eq!(got, vec![(day(2, 27), 3), (day(2, 28), 15), (day(3, 1), 2)]);
}

#[test]
fn per_app_daily_counts_skip_app_less_rows() {
    let by_app = stats::daily_counts_by_app(&sample_rows());
    assert_eq!(by_app["crond"].values().sum::<usize>(), 4);
    assert_eq!(by_app["crond"][&day(2, 27)], 1);
    assert_eq!(by_app["Squid"][&day(2, 28)], 7);
    assert_eq!(by_app["webmail"].len(), 2);
    let total: usize = by_app.values().flat_map(|days| days.values()).sum();
    assert_eq!(total, SAMPLE_RECORDS - 2);
}

#[test]
fn app_distribution_over_sample() {
    let shares = stats::app_distribution(&sample_rows());
    let got: Vec<(&str, usize)> = shares.iter().map(|s| (s.app.as_str(), s.count)).collect();
    assert_eq!(
        got,
        vec![
            ("Squid", 7),
            ("crond", 4),
            ("CUPS", 2),
            ("webmail", 2),
            ("Privoxy", 1),
            ("network", 1),
            ("privoxy", 1),
        ]
    );
    let percent_total: f64 = shares.iter().map(|s| s.percent).sum();
    assert!((percent_total - 100.0).abs() < 1e-9);
    assert!((shares[0].percent - 700.0 / 18.0).abs() < 1e-9);
}

#[test]
fn busy_days_are_strictly_above_threshold() {
    let daily = stats::daily_counts(&sample_rows());
    assert_eq!(stats::busy_days(&daily, 2), vec![day(2, 27), day(2, 28)]);
    assert_eq!(stats::busy_days(&daily, 3), vec![day(2, 28)]);
    assert_eq!(stats::busy_days(&daily, 15), Vec::<NaiveDate>::new());
}
