//! Ratatui widgets for the chart viewer.

pub mod app_breakdown;
pub mod distribution;
pub mod help;
pub mod tab_bar;
pub mod timeline;

use crate::data::{unscale, ChartData};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Axis, Block, Paragraph, Widget},
};

/// Day axis: first, middle and last day of the span.
fn day_axis<'a>(data: &ChartData, theme: &Theme) -> Axis<'a> {
    let last = data.span_days.saturating_sub(1) as f64;
    let mut labels: Vec<String> = Vec::new();
    for x in [0.0, (last / 2.0).floor(), last] {
        let label = data
            .day_at(x)
            .map(|day| day.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        if labels.last() != Some(&label) {
            labels.push(label);
        }
    }
    Axis::default()
        .style(theme.axis)
        .bounds([0.0, last.max(1.0)])
        .labels(labels)
}

/// Count axis over `[0, scaled_max]`, labelled in unscaled counts.
fn count_axis<'a>(scaled_max: f64, log_scale: bool, theme: &Theme) -> Axis<'a> {
    let top = scaled_max.max(1.0);
    let labels: Vec<String> = [0.0, top / 2.0, top]
        .iter()
        .map(|y| format!("{:.0}", unscale(*y, log_scale)))
        .collect();
    let title = if log_scale { "records (log)" } else { "records" };
    Axis::default()
        .title(title)
        .style(theme.axis)
        .bounds([0.0, top])
        .labels(labels)
}

fn render_empty(block: Block<'_>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from("no records to chart"))
        .block(block)
        .centered()
        .render(area, buf);
}
