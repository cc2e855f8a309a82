//! Per-day record counts with busy days marked.

use super::{count_axis, day_axis, render_empty};
use crate::data::{scale, ChartData};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    text::Line,
    widgets::{Block, Chart, Dataset, GraphType, Widget},
};

pub struct Timeline<'a> {
    data: &'a ChartData,
    log_scale: bool,
    theme: &'a Theme,
}

impl<'a> Timeline<'a> {
    pub fn new(data: &'a ChartData, log_scale: bool, theme: &'a Theme) -> Self {
        Self {
            data,
            log_scale,
            theme,
        }
    }
}

impl Widget for Timeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(" Records per day ", self.theme.title))
            .border_style(self.theme.border);
        if self.data.is_empty() {
            render_empty(block, area, buf);
            return;
        }

        let log = self.log_scale;
        let scaled = |points: &[(f64, f64)]| -> Vec<(f64, f64)> {
            points.iter().map(|(x, y)| (*x, scale(*y, log))).collect()
        };
        let daily = scaled(&self.data.daily);
        let busy = scaled(&self.data.busy_points());
        let last = self.data.span_days.saturating_sub(1) as f64;
        let threshold = scale(self.data.threshold as f64, log);
        let threshold_line = [(0.0, threshold), (last.max(1.0), threshold)];

        let mut datasets = vec![Dataset::default()
            .name("records")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.theme.line)
            .data(&daily)];
        // Threshold line only when it fits under the tallest day.
        let y_max = scale(self.data.max_daily(), log);
        if threshold <= y_max {
            datasets.push(
                Dataset::default()
                    .name(format!("> {}", self.data.threshold))
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(self.theme.axis)
                    .data(&threshold_line),
            );
        }
        if !busy.is_empty() {
            datasets.push(
                Dataset::default()
                    .name(format!("busy ({})", busy.len()))
                    .marker(Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(self.theme.busy)
                    .data(&busy),
            );
        }

        Chart::new(datasets)
            .block(block)
            .x_axis(day_axis(self.data, self.theme))
            .y_axis(count_axis(y_max, log, self.theme))
            .render(area, buf);
    }
}
