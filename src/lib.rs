//! varlog: normalise archived `/var/log` trees into one time-ordered table.
//!
//! This crate is the binary's library half: the [`commands`] the CLI runs,
//! plus re-exports of the layers so integration tests and benches can reach
//! them through one path.
//!
//! # Architecture
//!
//! ```text
//! walk ──► Router ──► Dialect::parse ──► Aggregator ──► Table ──► export
//!                                                         │
//!                                                         └──► charts
//! ```
//!
//! Everything runs on the calling thread.

pub mod commands;

pub use varlog_core::{
    config, detect_proxy, export, stats, Aggregator, Config, Diagnostic, DiagnosticKind,
    DiagnosticSummary, Dialect, ExportFormat, FormatMismatch, LogRecord, ParseContext,
    ProxyFormat, Router, Table, TableRow,
};
pub use varlog_feeds::{ingest, parse_lines, FeedError, IngestReport, ParseOptions};

use chrono::Datelike;

/// The year used for year-less timestamps: the configured one, or the
/// current UTC year. Resolved once per run.
pub fn assumed_year(configured: Option<i32>) -> i32 {
    configured.unwrap_or_else(|| chrono::Utc::now().year())
}
