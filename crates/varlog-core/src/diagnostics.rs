//! Structured diagnostics for skipped input.
//!
//! Nothing a run skips is fatal, but every skip except an unrecognised file
//! name leaves a [`Diagnostic`] behind so the skip rate can be counted and
//! asserted on.

use crate::error::FormatMismatch;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// A line matched no pattern of its dialect. The line is skipped.
    FormatMismatch,
    /// The file is not valid UTF-8. The file is skipped.
    DecodeError,
    /// The file could not be read at all. The file is skipped.
    Unreadable,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::FormatMismatch => write!(f, "format-mismatch"),
            DiagnosticKind::DecodeError => write!(f, "decode-error"),
            DiagnosticKind::Unreadable => write!(f, "unreadable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
    /// 1-based; `None` for whole-file diagnostics.
    pub line: Option<usize>,
    /// The offending line, or the error description for whole-file skips.
    pub text: String,
}

impl Diagnostic {
    pub fn mismatch(file: &Path, line: usize, err: FormatMismatch) -> Self {
        Self {
            kind: DiagnosticKind::FormatMismatch,
            file: file.to_path_buf(),
            line: Some(line),
            text: err.line,
        }
    }

    pub fn file_level(kind: DiagnosticKind, file: &Path, text: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.to_path_buf(),
            line: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}: {}:{}: {:?}",
                self.kind,
                self.file.display(),
                line,
                self.text
            ),
            None => write!(f, "{}: {}: {}", self.kind, self.file.display(), self.text),
        }
    }
}

/// Diagnostic counts per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    counts: BTreeMap<DiagnosticKind, usize>,
}

impl DiagnosticSummary {
    pub fn from_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut counts = BTreeMap::new();
        for diag in diagnostics {
            *counts.entry(diag.kind).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DiagnosticKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
