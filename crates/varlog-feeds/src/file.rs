//! Per-file reading and the line loop.

use crate::FeedError;
use std::path::Path;
use varlog_core::{Diagnostic, Dialect, LogRecord, ParseContext};

/// Knobs shared by every file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub context: ParseContext,
    /// Drop whitespace-only lines instead of reporting them as mismatches.
    pub skip_blank_lines: bool,
}

impl ParseOptions {
    pub fn new(assumed_year: i32) -> Self {
        Self {
            context: ParseContext::new(assumed_year),
            skip_blank_lines: true,
        }
    }

    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}

/// What one file produced.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub records: Vec<LogRecord>,
    /// Only `FormatMismatch` diagnostics; whole-file failures are errors.
    pub diagnostics: Vec<Diagnostic>,
}

/// Read `path` as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, FeedError> {
    let bytes = std::fs::read(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|err| FeedError::Decode {
        path: path.to_path_buf(),
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

/// Parse every line of `text` with `dialect`.
///
/// `source` only labels diagnostics. Line numbers are 1-based and count
/// skipped blank lines, so they match what an editor shows.
pub fn parse_lines(
    text: &str,
    dialect: Dialect,
    source: &Path,
    options: &ParseOptions,
) -> FileOutcome {
    let mut outcome = FileOutcome::default();
    for (idx, line) in text.lines().enumerate() {
        if options.skip_blank_lines && line.trim().is_empty() {
            continue;
        }
        match dialect.parse(line, &options.context) {
            Ok(record) => outcome.records.push(record),
            Err(err) => {
                tracing::trace!(file = %source.display(), line = idx + 1, %err, "line skipped");
                outcome.diagnostics.push(Diagnostic::mismatch(source, idx + 1, err));
            }
        }
    }
    outcome
}

/// Read and parse one file.
pub fn parse_file(
    path: &Path,
    dialect: Dialect,
    options: &ParseOptions,
) -> Result<FileOutcome, FeedError> {
    let text = read_file(path)?;
    let outcome = parse_lines(&text, dialect, path, options);
    tracing::debug!(
        file = %path.display(),
        %dialect,
        records = outcome.records.len(),
        mismatches = outcome.diagnostics.len(),
        "file parsed"
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
