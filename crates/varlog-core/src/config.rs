//! Configuration types for varlog.
//!
//! [`Config::load`] reads `~/.config/varlog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads
//! an explicit file instead, and [`Config::defaults`] returns the defaults
//! without touching the filesystem (useful in tests).

use crate::export::ExportFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ingest]
# assumed_year = 2006
skip_blank_lines = true

[router]
# Appended after the built-in rules. Patterns are anchored at the start of
# the file name.
# extra_rules = [{ pattern = 'messages(\.\d+)?', dialect = "syslog" }]
extra_rules = []

[export]
format = "csv"
path   = "logs.csv"

[charts]
highlight_threshold = 2000
log_scale           = false
max_apps            = 8
theme               = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// `[ingest]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Year for dialects whose timestamps carry none. `None` means the
    /// current year, resolved once per run by the caller.
    #[serde(default)]
    pub assumed_year: Option<i32>,
    #[serde(default = "default_skip_blank_lines")]
    pub skip_blank_lines: bool,
}

fn default_skip_blank_lines() -> bool { true }

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            assumed_year: None,
            skip_blank_lines: default_skip_blank_lines(),
        }
    }
}

/// `[router]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub extra_rules: Vec<RuleConfig>,
}

/// One `{ pattern, dialect }` entry of `[router] extra_rules`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub dialect: String,
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_format")]
    pub format: ExportFormat,
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
}

fn default_export_format() -> ExportFormat { ExportFormat::Csv }
fn default_export_path() -> PathBuf { PathBuf::from("logs.csv") }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
            path: default_export_path(),
        }
    }
}

/// `[charts]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    /// Days with more records than this are highlighted.
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: usize,
    #[serde(default)]
    pub log_scale: bool,
    /// Per-app chart shows at most this many of the busiest apps.
    #[serde(default = "default_max_apps")]
    pub max_apps: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_highlight_threshold() -> usize { 2000 }
fn default_max_apps() -> usize { 8 }
fn default_theme() -> String { "default".to_string() }

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            highlight_threshold: default_highlight_threshold(),
            log_scale: false,
            max_apps: default_max_apps(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/varlog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "wrote default config");
        }

        Self::layered(&path)
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        Self::layered(path)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn layered(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/varlog/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("varlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
