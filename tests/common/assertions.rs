//! Domain-specific assertion macros for varlog harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! record (by its raw line) that broke the expectation, so a failing corpus
//! case can be found without a debugger.

use varlog_core::{Diagnostic, DiagnosticKind, LogRecord};

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert a record's `app_name`.
///
/// ```rust
/// assert_app!(record, Some("crond"));
/// assert_app!(record, None);
/// ```
#[macro_export]
macro_rules! assert_app {
    ($record:expr, $expected:expr) => {{
        let record: &varlog_core::LogRecord = &$record;
        let expected: Option<&str> = $expected;
        if record.app_name.as_deref() != expected {
            panic!(
                "assert_app! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw:      {:?}",
                expected, record.app_name, record.raw
            );
        }
    }};
}

/// Assert a record's `host_name`.
#[macro_export]
macro_rules! assert_host {
    ($record:expr, $expected:expr) => {{
        let record: &varlog_core::LogRecord = &$record;
        let expected: Option<&str> = $expected;
        if record.host_name.as_deref() != expected {
            panic!(
                "assert_host! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw:      {:?}",
                expected, record.host_name, record.raw
            );
        }
    }};
}

/// Assert a record's normalised timestamp.
///
/// ```rust
/// assert_timestamp!(record, utc(2006, 2, 28, 17, 0, 0));
/// ```
#[macro_export]
macro_rules! assert_timestamp {
    ($record:expr, $expected:expr) => {{
        let record: &varlog_core::LogRecord = &$record;
        let expected: chrono::DateTime<chrono::Utc> = $expected;
        if record.timestamp != expected {
            panic!(
                "assert_timestamp! failed:\n  expected: {}\n  actual:   {}\n  raw:      {:?}",
                expected, record.timestamp, record.raw
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Parse results
// ---------------------------------------------------------------------------

/// Assert a parse result is a `FormatMismatch` from `dialect` that carries
/// the original line.
#[macro_export]
macro_rules! assert_mismatch {
    ($result:expr, $dialect:expr, $line:expr) => {{
        match $result {
            Ok(record) => panic!(
                "assert_mismatch! failed: {:?} parsed as {}",
                $line,
                record.render()
            ),
            Err(err) => {
                pretty_assertions::assert_eq!(err.dialect, $dialect);
                pretty_assertions::assert_eq!(err.line, $line);
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Panic unless `records` is in non-decreasing timestamp order.
pub fn assert_sorted(records: &[LogRecord]) {
    if let Some(idx) = records
        .windows(2)
        .position(|pair| pair[0].timestamp > pair[1].timestamp)
    {
        panic!(
            "records out of order at index {}:\n  {}\n  {}",
            idx,
            records[idx].render(),
            records[idx + 1].render()
        );
    }
}

/// Diagnostics of one kind, as `(file name, line)` pairs for compact
/// comparison.
pub fn diagnostics_of(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> Vec<(String, Option<usize>)> {
    diagnostics
        .iter()
        .filter(|d| d.kind == kind)
        .map(|d| {
            let name = d
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, d.line)
        })
        .collect()
}
