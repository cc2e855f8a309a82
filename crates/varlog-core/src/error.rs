//! Error types shared across varlog-core.

use crate::dialect::Dialect;

/// A line that does not match the structure (or the timestamp sub-format)
/// its dialect expects. Always a per-line skip, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line does not match the {dialect} format: {line:?}")]
pub struct FormatMismatch {
    pub dialect: Dialect,
    pub line: String,
}

impl FormatMismatch {
    pub fn new(dialect: Dialect, line: impl Into<String>) -> Self {
        Self {
            dialect,
            line: line.into(),
        }
    }
}

/// Invalid routing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid router pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown dialect {0:?} (expected syslog, privoxy, proxy, printer or web-access)")]
    UnknownDialect(String),
}
