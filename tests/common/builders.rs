//! Test builders: records, timestamps and on-disk log trees.
//!
//! These are for readability in assertions, not production use. They panic
//! on invalid input rather than returning `Result`.

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;
use varlog_core::{LogRecord, ParseContext};
use varlog_feeds::ParseOptions;

/// Assumed year for every harness.
pub const YEAR: i32 = 2006;

pub fn ctx() -> ParseContext {
    ParseContext::new(YEAR)
}

pub fn options() -> ParseOptions {
    ParseOptions::new(YEAR)
}

/// `Utc.with_ymd_and_hms(..).unwrap()` without the noise.
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogRecord`] fixtures.
///
/// ```rust
/// let record = RecordBuilder::at(utc(2006, 2, 28, 12, 0, 0))
///     .app("crond")
///     .message("job started")
///     .build();
/// ```
pub struct RecordBuilder {
    record: LogRecord,
}

impl RecordBuilder {
    pub fn at(ts: DateTime<Utc>) -> Self {
        Self {
            record: LogRecord::new(ts, format!("raw@{}", ts.timestamp())),
        }
    }

    /// A record `secs` seconds after the start of [`YEAR`].
    pub fn at_secs(secs: i64) -> Self {
        Self::at(utc(YEAR, 1, 1, 0, 0, 0) + chrono::Duration::seconds(secs))
    }

    pub fn raw(mut self, raw: &str) -> Self {
        self.record.raw = raw.to_string();
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.record.host_name = Some(host.to_string());
        self
    }

    pub fn app(mut self, app: &str) -> Self {
        self.record.app_name = Some(app.to_string());
        self
    }

    pub fn pid(mut self, pid: u32) -> Self {
        self.record.process_id = Some(pid);
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.record.message = Some(message.to_string());
        self
    }

    pub fn build(self) -> LogRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// LogTree
// ---------------------------------------------------------------------------

/// A temporary `/var/log`-like directory.
///
/// ```rust
/// let tree = LogTree::new()
///     .lines("cron", CORPUS_CRON)
///     .bytes("boot.log", b"\xff")
///     .build();
/// ```
pub struct LogTree {
    dir: TempDir,
}

impl LogTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `lines` joined by `\n` (with a trailing newline) to `rel`.
    pub fn lines(self, rel: &str, lines: &[&str]) -> Self {
        let mut text = lines.join("\n");
        text.push('\n');
        self.bytes(rel, text.as_bytes())
    }

    pub fn bytes(self, rel: &str, contents: &[u8]) -> Self {
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

/// The relative path of `path` under `root`, with `/` separators.
pub fn rel(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
