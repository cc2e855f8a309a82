//! varlog TUI: terminal chart viewer over a persisted table.

pub mod app;
pub mod data;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use data::ChartData;

use varlog_core::config::ChartsConfig;
use varlog_core::Table;

/// Viewer settings, usually `[charts]` with CLI overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Days with more records than this are highlighted.
    pub threshold: usize,
    pub log_scale: bool,
    pub max_apps: usize,
    /// Built-in theme name or a path to a `.toml` theme.
    pub theme: String,
}

impl From<&ChartsConfig> for ChartOptions {
    fn from(cfg: &ChartsConfig) -> Self {
        Self {
            threshold: cfg.highlight_threshold,
            log_scale: cfg.log_scale,
            max_apps: cfg.max_apps,
            theme: cfg.theme.clone(),
        }
    }
}

/// Open the chart viewer on `table` and block until the user quits.
pub fn run(table: &Table, options: &ChartOptions) -> anyhow::Result<()> {
    let theme = theme::Theme::load(&options.theme)?;
    let data = ChartData::from_rows(table.rows(), options.threshold, options.max_apps);
    tracing::debug!(
        rows = table.len(),
        days = data.span_days,
        apps = data.per_app.len(),
        busy_days = data.busy_days.len(),
        "chart data ready"
    );
    App::new(data, theme, options.log_scale).run()
}
