//! One line per app: records per day for the busiest apps.

use super::{count_axis, day_axis, render_empty};
use crate::data::{scale, ChartData};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    symbols::Marker,
    text::Line,
    widgets::{Block, Chart, Dataset, GraphType, LegendPosition, Widget},
};

pub struct AppBreakdown<'a> {
    data: &'a ChartData,
    log_scale: bool,
    theme: &'a Theme,
}

impl<'a> AppBreakdown<'a> {
    pub fn new(data: &'a ChartData, log_scale: bool, theme: &'a Theme) -> Self {
        Self {
            data,
            log_scale,
            theme,
        }
    }
}

impl Widget for AppBreakdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Records per app per day (top {}) ", self.data.per_app.len());
        let block = Block::bordered()
            .title(Line::styled(title, self.theme.title))
            .border_style(self.theme.border);
        if self.data.per_app.is_empty() {
            render_empty(block, area, buf);
            return;
        }

        let log = self.log_scale;
        let series: Vec<(String, Vec<(f64, f64)>)> = self
            .data
            .per_app
            .iter()
            .map(|s| {
                let points = s.points.iter().map(|(x, y)| (*x, scale(*y, log))).collect();
                (format!("{} ({})", s.app, s.total), points)
            })
            .collect();

        let datasets: Vec<Dataset> = series
            .iter()
            .zip(&self.data.per_app)
            .map(|((name, points), s)| {
                Dataset::default()
                    .name(name.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(self.theme.app_style(&s.app))
                    .data(points)
            })
            .collect();

        Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Percentage(40), Constraint::Percentage(60)))
            .x_axis(day_axis(self.data, self.theme))
            .y_axis(count_axis(scale(self.data.max_per_app(), log), log, self.theme))
            .render(area, buf);
    }
}
