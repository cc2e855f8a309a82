//! varlog-feeds: turn a log directory into normalised records.
//!
//! [`ingest`] walks a root, routes each file by name, parses the routed ones
//! line by line and hands everything to an [`Aggregator`]. Nothing it meets
//! along the way is fatal except a root that cannot be read at all: bad
//! files and bad lines become [`Diagnostic`]s on the [`IngestReport`].

pub mod file;
pub mod walk;

pub use file::{parse_file, parse_lines, read_file, FileOutcome, ParseOptions};
pub use walk::{walk, WalkEntry};

use std::path::{Path, PathBuf};
use varlog_core::{
    Aggregator, Diagnostic, DiagnosticKind, DiagnosticSummary, LogRecord, Router, Table,
};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("{}: not valid UTF-8 after byte {valid_up_to}", path.display())]
    Decode { path: PathBuf, valid_up_to: usize },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    pub fn path(&self) -> &Path {
        match self {
            FeedError::Decode { path, .. } | FeedError::Io { path, .. } => path,
        }
    }

    /// Diagnostic kind used when this error skips a file.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            FeedError::Decode { .. } => DiagnosticKind::DecodeError,
            FeedError::Io { .. } => DiagnosticKind::Unreadable,
        }
    }

    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::file_level(self.kind(), self.path(), self.to_string())
    }
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Sorted by timestamp.
    pub records: Vec<LogRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub files_parsed: usize,
    /// Files dropped with a diagnostic.
    pub files_skipped: usize,
    /// Files no router rule claimed.
    pub files_unrouted: usize,
}

impl IngestReport {
    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_diagnostics(&self.diagnostics)
    }

    pub fn table(&self) -> Table {
        Table::from_records(&self.records)
    }
}

/// Ingest every routable file under `root`.
pub fn ingest(root: &Path, router: &Router, options: &ParseOptions) -> Result<IngestReport, FeedError> {
    std::fs::metadata(root).map_err(|source| FeedError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut report = IngestReport::default();
    let mut aggregator = Aggregator::new();

    for entry in walk(root) {
        let path = match entry {
            WalkEntry::File(path) => path,
            WalkEntry::Failed { path, error } => {
                tracing::debug!(path = %path.display(), %error, "walk entry skipped");
                report.files_skipped += 1;
                report.diagnostics.push(Diagnostic::file_level(
                    DiagnosticKind::Unreadable,
                    &path,
                    error.to_string(),
                ));
                continue;
            }
        };

        let Some(dialect) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| router.route(name))
        else {
            tracing::trace!(path = %path.display(), "no route");
            report.files_unrouted += 1;
            continue;
        };

        match parse_file(&path, dialect, options) {
            Ok(outcome) => {
                report.files_parsed += 1;
                aggregator.extend(outcome.records);
                report.diagnostics.extend(outcome.diagnostics);
            }
            Err(err) => {
                tracing::debug!(%err, "file skipped");
                report.files_skipped += 1;
                report.diagnostics.push(err.into_diagnostic());
            }
        }
    }

    report.records = aggregator.finish();
    tracing::info!(
        root = %root.display(),
        records = report.records.len(),
        files_parsed = report.files_parsed,
        files_skipped = report.files_skipped,
        diagnostics = report.diagnostics.len(),
        "ingest finished"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
