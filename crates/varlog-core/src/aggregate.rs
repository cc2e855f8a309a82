//! Aggregator: merges every file's records into one time-ordered sequence.
//!
//! Batches can arrive in any order (file walk order says nothing about
//! timestamps), so the whole set is re-sorted on [`Aggregator::finish`]
//! rather than merged. The sort is stable: records sharing a timestamp keep
//! the order they were pushed in.

use crate::types::LogRecord;

#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<LogRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    /// Append one file's records, in their file order.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = LogRecord>) {
        self.records.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ascending by timestamp, ties in insertion order.
    pub fn finish(mut self) -> Vec<LogRecord> {
        sort_by_timestamp(&mut self.records);
        self.records
    }
}

/// Stable ascending sort on `timestamp` only.
pub fn sort_by_timestamp(records: &mut [LogRecord]) {
    records.sort_by_key(|record| record.timestamp);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
