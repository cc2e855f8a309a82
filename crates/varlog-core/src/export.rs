//! Export: persist a [`Table`] and load it back for the chart viewer.
//!
//! Three formats are written:
//!
//! | Format | Shape | Reloadable |
//! |--------|-------|------------|
//! | `csv` | header row of [`COLUMNS`], one row per record | yes |
//! | `jsonl` | one JSON object per row | yes |
//! | `text` | the syslog-style rendering, one line per row | no |
//!
//! Absent values are empty CSV cells / JSON `null`, never the `-`
//! placeholder, so a reload gets `None` back.

use crate::table::{Table, TableRow, COLUMNS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Jsonl,
    Text,
}

impl ExportFormat {
    /// Guess from a file extension (`.csv`, `.jsonl`/`.json`, `.txt`/`.log`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "jsonl" | "json" | "ndjson" => Some(ExportFormat::Jsonl),
            "txt" | "log" => Some(ExportFormat::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Jsonl => write!(f, "jsonl"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "json" => Ok(ExportFormat::Jsonl),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid json on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown export format {0:?} (expected csv, jsonl or text)")]
    UnknownFormat(String),
    #[error("{0} dumps cannot be reloaded; export as csv or jsonl")]
    NotReloadable(ExportFormat),
    #[error("csv header {found:?} does not match the expected columns")]
    Header { found: Vec<String> },
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write `table` to `writer` in `format`.
pub fn write_table<W: Write>(
    table: &Table,
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            if table.is_empty() {
                wtr.write_record(COLUMNS)?;
            }
            for row in table.rows() {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        ExportFormat::Jsonl => {
            let mut out = BufWriter::new(writer);
            for (idx, row) in table.rows().iter().enumerate() {
                serde_json::to_writer(&mut out, row).map_err(|source| ExportError::Json {
                    line: idx + 1,
                    source,
                })?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
        ExportFormat::Text => {
            let mut out = BufWriter::new(writer);
            for row in table.rows() {
                writeln!(out, "{row}")?;
            }
            out.flush()?;
        }
    }
    tracing::debug!(rows = table.len(), %format, "table written");
    Ok(())
}

/// Create (or truncate) `path` and write `table` to it.
pub fn write_table_to_path(
    table: &Table,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_table(table, format, file)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Load a table previously written in `format`.
pub fn read_table<R: Read>(format: ExportFormat, reader: R) -> Result<Table, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut rdr = csv::Reader::from_reader(reader);
            let headers = rdr.headers()?.clone();
            if !headers.iter().eq(COLUMNS.iter().copied()) {
                return Err(ExportError::Header {
                    found: headers.iter().map(str::to_string).collect(),
                });
            }
            rdr.deserialize::<TableRow>()
                .collect::<Result<Table, _>>()
                .map_err(ExportError::from)
        }
        ExportFormat::Jsonl => {
            let mut rows = Vec::new();
            for (idx, line) in BufReader::new(reader).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let row: TableRow = serde_json::from_str(&line).map_err(|source| {
                    ExportError::Json {
                        line: idx + 1,
                        source,
                    }
                })?;
                rows.push(row);
            }
            Ok(rows.into_iter().collect())
        }
        ExportFormat::Text => Err(ExportError::NotReloadable(ExportFormat::Text)),
    }
}

/// Load a dump, picking the format from the file extension (CSV when unknown).
pub fn read_table_from_path(path: &Path) -> Result<Table, ExportError> {
    let format = ExportFormat::from_path(path).unwrap_or(ExportFormat::Csv);
    let table = read_table(format, File::open(path)?)?;
    tracing::debug!(rows = table.len(), path = %path.display(), %format, "table loaded");
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
