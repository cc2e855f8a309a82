//! Colour theme for the chart viewer.
//!
//! Themes are TOML files. The built-in ones are embedded with
//! [`include_str!`] so the viewer works without any files on disk; a path to
//! a `.toml` file loads a user theme through the same parser.
//!
//! # Colour assignment for apps
//!
//! App names are hashed to a stable index into the palette so an app keeps
//! its colour across tabs and runs, whatever its rank.

use config::{Config, File, FileFormat, Source};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// TOML shape
// ---------------------------------------------------------------------------

/// One `{ fg = "...", bold = true }` entry. Colours use ratatui's names
/// (`dark_gray`, `light_blue`), `#rrggbb`, or a 0-255 palette index.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleSpec {
    fg: Option<String>,
    bg: Option<String>,
    bold: bool,
    dim: bool,
    italic: bool,
}

impl From<StyleSpec> for Style {
    fn from(spec: StyleSpec) -> Self {
        let mut modifiers = Modifier::empty();
        modifiers.set(Modifier::BOLD, spec.bold);
        modifiers.set(Modifier::DIM, spec.dim);
        modifiers.set(Modifier::ITALIC, spec.italic);

        let mut style = Style::default().add_modifier(modifiers);
        if let Some(fg) = spec.fg.as_deref().and_then(color) {
            style = style.fg(fg);
        }
        if let Some(bg) = spec.bg.as_deref().and_then(color) {
            style = style.bg(bg);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct ThemeSpec {
    chart: ChartSpec,
    bars: BarsSpec,
    chrome: ChromeSpec,
    apps: AppsSpec,
}

#[derive(Debug, Deserialize)]
struct ChartSpec {
    line: StyleSpec,
    busy: StyleSpec,
    axis: StyleSpec,
    title: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct BarsSpec {
    bar: StyleSpec,
    value: StyleSpec,
    label: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct ChromeSpec {
    active_tab: StyleSpec,
    border: StyleSpec,
    status: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct AppsSpec {
    palette: Vec<String>,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Resolved styles; build once and pass by reference.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Per-day series.
    pub line: Style,
    /// Markers for days above the highlight threshold.
    pub busy: Style,
    pub axis: Style,
    pub title: Style,

    pub bar: Style,
    pub bar_value: Style,
    pub bar_label: Style,

    pub active_tab: Style,
    pub border: Style,
    pub status: Style,

    app_palette: Vec<Color>,
}

impl Theme {
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme")
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC).expect("embedded gruvbox theme")
    }

    /// Resolve a theme by built-in name, or load it from a `.toml` path.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Ok(Self::load_gruvbox_dark()),
            _ if name.ends_with(".toml") => Self::from_file(Path::new(name)),
            _ => anyhow::bail!("unknown theme {name:?} (expected default, gruvbox or a .toml path)"),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_source(File::from(path).format(FileFormat::Toml))
    }

    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        Self::from_source(File::from_str(src, FileFormat::Toml))
    }

    fn from_source(source: impl Source + Send + Sync + 'static) -> anyhow::Result<Self> {
        let spec: ThemeSpec = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(Self {
            line: spec.chart.line.into(),
            busy: spec.chart.busy.into(),
            axis: spec.chart.axis.into(),
            title: spec.chart.title.into(),
            bar: spec.bars.bar.into(),
            bar_value: spec.bars.value.into(),
            bar_label: spec.bars.label.into(),
            active_tab: spec.chrome.active_tab.into(),
            border: spec.chrome.border.into(),
            status: spec.chrome.status.into(),
            app_palette: spec.apps.palette.iter().filter_map(|c| color(c)).collect(),
        })
    }

    /// Stable colour for an app name.
    pub fn app_style(&self, app: &str) -> Style {
        match self.app_palette.len() {
            0 => Style::default(),
            n => Style::default().fg(self.app_palette[stable_hash(app) % n]),
        }
    }
}

/// djb2-style; stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(5381usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

fn color(s: &str) -> Option<Color> {
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
