//! Table projection: the fixed nine-column view of the aggregated records.
//!
//! This is the shape that gets persisted and that the chart viewer reloads.
//! `raw` and `error` stay behind on the [`LogRecord`]; structured data is
//! flattened to its rendered form so every column is a scalar.

use crate::types::{or_placeholder, render_structured_data, render_timestamp, LogRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names, in order, as written to every persisted table.
pub const COLUMNS: [&str; 9] = [
    "priority",
    "protocol_ver",
    "timestamp",
    "host_name",
    "app_name",
    "process_id",
    "message_id",
    "struct_data",
    "message",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub priority: Option<u8>,
    pub protocol_ver: u32,
    pub timestamp: DateTime<Utc>,
    pub host_name: Option<String>,
    pub app_name: Option<String>,
    pub process_id: Option<u32>,
    pub message_id: Option<String>,
    /// `-` or `[k="v" ...]`.
    pub struct_data: String,
    pub message: Option<String>,
}

impl From<&LogRecord> for TableRow {
    fn from(record: &LogRecord) -> Self {
        Self {
            priority: record.priority,
            protocol_ver: record.protocol_version,
            timestamp: record.timestamp,
            host_name: record.host_name.clone(),
            app_name: record.app_name.clone(),
            process_id: record.process_id,
            message_id: record.message_id.clone(),
            struct_data: render_structured_data(&record.structured_data),
            message: record.message.clone(),
        }
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}>{} {} {} {} {} {} {} {}",
            or_placeholder(self.priority),
            self.protocol_ver,
            render_timestamp(&self.timestamp),
            or_placeholder(self.host_name.as_deref()),
            or_placeholder(self.app_name.as_deref()),
            or_placeholder(self.process_id),
            or_placeholder(self.message_id.as_deref()),
            self.struct_data,
            or_placeholder(self.message.as_deref()),
        )
    }
}

/// Ordered rows, usually straight out of [`Aggregator::finish`](crate::Aggregator::finish).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn from_records(records: &[LogRecord]) -> Self {
        records.iter().map(TableRow::from).collect()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TableRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<TableRow> for Table {
    fn from_iter<I: IntoIterator<Item = TableRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
