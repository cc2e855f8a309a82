//! The work behind each CLI subcommand, free of argument parsing.

use anyhow::Context;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use varlog_core::export::{self, ExportFormat};
use varlog_core::{Config, Diagnostic, Dialect, Router, Table};
use varlog_feeds::{IngestReport, ParseOptions};

/// Where a scan writes its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// `-` is stdout; anything else is a file path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Output::Stdout
        } else {
            Output::File(PathBuf::from(arg))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub output: Output,
    pub format: ExportFormat,
    pub options: ParseOptions,
}

impl ScanRequest {
    /// Fill whatever the command line left unset from `cfg`. An explicit
    /// format wins, then the output file's extension, then `[export] format`.
    pub fn resolve(
        root: PathBuf,
        output: Option<&str>,
        format: Option<ExportFormat>,
        year: Option<i32>,
        cfg: &Config,
    ) -> Self {
        let output = match output {
            Some(arg) => Output::parse(arg),
            None => Output::File(cfg.export.path.clone()),
        };
        let format = format
            .or_else(|| match &output {
                Output::File(path) => ExportFormat::from_path(path),
                Output::Stdout => None,
            })
            .unwrap_or(cfg.export.format);
        let year = crate::assumed_year(year.or(cfg.ingest.assumed_year));
        let options = ParseOptions::new(year).skip_blank_lines(cfg.ingest.skip_blank_lines);
        Self {
            root,
            output,
            format,
            options,
        }
    }
}

/// Ingest `req.root`, persist the sorted table, and return the report.
pub fn scan(req: &ScanRequest, router: &Router) -> anyhow::Result<IngestReport> {
    let report = varlog_feeds::ingest(&req.root, router, &req.options)
        .with_context(|| format!("failed to scan {}", req.root.display()))?;
    let table = report.table();

    match &req.output {
        Output::Stdout => export::write_table(&table, req.format, io::stdout().lock())?,
        Output::File(path) => export::write_table_to_path(&table, req.format, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
    }
    Ok(report)
}

/// Human summary of a scan: counts, then one line per diagnostic kind.
pub fn write_summary<W: Write>(report: &IngestReport, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "{} records from {} files ({} skipped, {} unrouted)",
        report.records.len(),
        report.files_parsed,
        report.files_skipped,
        report.files_unrouted
    )?;
    for (kind, count) in report.summary().iter() {
        writeln!(out, "  {kind}: {count}")?;
    }
    Ok(())
}

/// Parse `input` (or stdin) as `dialect` and print one rendered record per
/// parsed line. Returns the diagnostics for lines that did not parse.
pub fn parse<W: Write>(
    dialect: Dialect,
    input: Option<&Path>,
    options: &ParseOptions,
    mut out: W,
) -> anyhow::Result<Vec<Diagnostic>> {
    let (text, source) = match input {
        Some(path) => (varlog_feeds::read_file(path)?, path.to_path_buf()),
        None => (read_stdin()?, PathBuf::from("<stdin>")),
    };
    let outcome = varlog_feeds::parse_lines(&text, dialect, &source, options);
    for record in &outcome.records {
        writeln!(out, "{record}")?;
    }
    Ok(outcome.diagnostics)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    io::stdin().lock().read_to_end(&mut bytes)?;
    String::from_utf8(bytes).context("stdin is not valid UTF-8")
}

/// Reload a dump written by [`scan`].
pub fn load_dump(path: &Path) -> anyhow::Result<Table> {
    export::read_table_from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

/// One line per diagnostic.
pub fn write_diagnostics<W: Write>(diagnostics: &[Diagnostic], mut out: W) -> io::Result<()> {
    for diag in diagnostics {
        writeln!(out, "{diag}")?;
    }
    Ok(())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
