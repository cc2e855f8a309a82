use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use varlog::commands::{self, ScanRequest};
use varlog::{Config, Dialect, ExportFormat, ParseOptions, Router};
use varlog_tui::ChartOptions;

const DEBUG_LOG: &str = "/tmp/varlog-debug.log";

#[derive(Parser)]
#[command(name = "varlog", about = "Normalise archived /var/log trees and chart them")]
struct Cli {
    /// Use this config file instead of ~/.config/varlog/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/varlog-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every recognised log under ROOT into one time-ordered table.
    Scan {
        root: PathBuf,
        /// Output file, or `-` for stdout. Defaults to `[export] path`.
        #[arg(short, long)]
        output: Option<String>,
        /// csv, jsonl or text. Defaults to the output extension, then `[export] format`.
        #[arg(short, long)]
        format: Option<ExportFormat>,
        /// Year for timestamps that carry none. Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Also print every skipped line and file.
        #[arg(short, long)]
        verbose: bool,
        /// Print nothing but errors.
        #[arg(short, long, conflicts_with = "verbose")]
        quiet: bool,
    },
    /// Open the chart viewer on a table written by `scan`.
    Chart {
        dump: PathBuf,
        #[arg(long)]
        log_scale: bool,
        /// Highlight days with more records than this.
        #[arg(long)]
        threshold: Option<usize>,
        /// Number of apps charted individually.
        #[arg(long)]
        max_apps: Option<usize>,
        /// default, gruvbox, or a path to a .toml theme.
        #[arg(long)]
        theme: Option<String>,
    },
    /// Parse one file (or stdin) with an explicit dialect and print records.
    Parse {
        #[arg(short, long)]
        dialect: Dialect,
        file: Option<PathBuf>,
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "config not loaded, using defaults");
            Config::defaults()
        }),
    };

    match cli.command {
        Command::Scan {
            root,
            output,
            format,
            year,
            verbose,
            quiet,
        } => {
            let router = Router::with_extra_rules(&cfg.router.extra_rules)?;
            let req = ScanRequest::resolve(root, output.as_deref(), format, year, &cfg);
            let report = commands::scan(&req, &router)?;
            if verbose {
                commands::write_diagnostics(&report.diagnostics, io::stderr().lock())?;
            }
            if !quiet {
                commands::write_summary(&report, io::stderr().lock())?;
            }
        }
        Command::Chart {
            dump,
            log_scale,
            threshold,
            max_apps,
            theme,
        } => {
            let mut options = ChartOptions::from(&cfg.charts);
            options.log_scale |= log_scale;
            options.threshold = threshold.unwrap_or(options.threshold);
            options.max_apps = max_apps.unwrap_or(options.max_apps);
            if let Some(theme) = theme {
                options.theme = theme;
            }
            let table = commands::load_dump(&dump)?;
            varlog_tui::run(&table, &options)?;
        }
        Command::Parse {
            dialect,
            file,
            year,
        } => {
            let year = varlog::assumed_year(year.or(cfg.ingest.assumed_year));
            let options = ParseOptions::new(year).skip_blank_lines(cfg.ingest.skip_blank_lines);
            let diagnostics =
                commands::parse(dialect, file.as_deref(), &options, io::stdout().lock())?;
            commands::write_diagnostics(&diagnostics, io::stderr().lock())?;
        }
    }
    Ok(())
}

/// Stderr logging at `RUST_LOG` (default `warn`), or a debug file with
/// `--debug`. The chart viewer owns the terminal, so without `--debug` it
/// logs nowhere.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("varlog debug log started, tail -f {DEBUG_LOG}");
    } else if !matches!(cli.command, Command::Chart { .. }) {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
