//! varlog-core: normalise archived `/var/log` trees into one timeline.
//!
//! This crate holds everything that does not touch the filesystem walk or the
//! terminal: the record model, the per-dialect parsers, the file-name router,
//! the aggregator and the persisted table.
//!
//! # Architecture
//!
//! ```text
//! file name ──► Router ──► Dialect::parse ──► LogRecord ──► Aggregator
//!                              │                                 │
//!                              └──► FormatMismatch ──► Diagnostic │
//!                                                                ▼
//!                                        stats ◄── Table ──► export
//! ```
//!
//! Parsing is pure: a line plus a [`ParseContext`] in, a record or a
//! [`FormatMismatch`] out.

pub mod aggregate;
pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod export;
pub mod router;
pub mod stats;
pub mod table;
pub mod timestamp;
pub mod types;

pub use aggregate::Aggregator;
pub use config::Config;
pub use detect::{detect_proxy, ProxyFormat};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSummary};
pub use dialect::{Dialect, ParseContext};
pub use error::{ConfigError, FormatMismatch};
pub use export::{ExportError, ExportFormat};
pub use router::Router;
pub use table::{Table, TableRow};
pub use types::LogRecord;
