//! Core types for varlog-core.
//!
//! This module defines the normalised [`LogRecord`] every dialect parser
//! produces, and its single-line syslog-style rendering.

use crate::table::TableRow;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder written for every absent field in textual output.
pub const PLACEHOLDER: &str = "-";

/// Key/value pairs rendered as one `[k="v" ...]` element.
pub type StructuredData = BTreeMap<String, String>;

/// A normalised log record produced from exactly one raw line.
///
/// `timestamp` and `raw` are always present. Every other field is optional
/// and stays `None` when the dialect has nothing to put there; rendering
/// turns `None` into [`PLACEHOLDER`] without touching the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Syslog PRI value. No current dialect carries one.
    pub priority: Option<u8>,
    pub protocol_version: u32,
    /// Always UTC; dialect offsets are applied before construction.
    pub timestamp: DateTime<Utc>,
    pub host_name: Option<String>,
    pub app_name: Option<String>,
    pub process_id: Option<u32>,
    pub message_id: Option<String>,
    pub structured_data: StructuredData,
    /// Free-text remainder of the line.
    pub message: Option<String>,
    /// The line exactly as read, without its terminator.
    pub raw: String,
    /// Reserved for validation failures; never set by a parser.
    pub error: bool,
}

impl LogRecord {
    pub fn new(timestamp: DateTime<Utc>, raw: impl Into<String>) -> Self {
        Self {
            priority: None,
            protocol_version: 1,
            timestamp,
            host_name: None,
            app_name: None,
            process_id: None,
            message_id: None,
            structured_data: StructuredData::new(),
            message: None,
            raw: raw.into(),
            error: false,
        }
    }

    pub fn with_priority(mut self, priority: Option<u8>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_host_name(mut self, host_name: Option<impl Into<String>>) -> Self {
        self.host_name = host_name.map(Into::into);
        self
    }

    pub fn with_app_name(mut self, app_name: Option<impl Into<String>>) -> Self {
        self.app_name = app_name.map(Into::into);
        self
    }

    pub fn with_process_id(mut self, process_id: Option<u32>) -> Self {
        self.process_id = process_id;
        self
    }

    pub fn with_message(mut self, message: Option<impl Into<String>>) -> Self {
        self.message = message.map(Into::into);
        self
    }

    pub fn with_structured(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.structured_data.insert(key.into(), value.into());
        self
    }

    /// Render as `<pri>ver timestamp host app pid msgid sd message`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&TableRow::from(self), f)
    }
}

/// `2006-02-28T17:00:00.000000+00:00`
pub fn render_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// `-` when empty, otherwise `[k1="v1" k2="v2"]`.
pub fn render_structured_data(data: &StructuredData) -> String {
    if data.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let pairs: Vec<String> = data
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect();
    format!("[{}]", pairs.join(" "))
}

pub(crate) fn or_placeholder<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
