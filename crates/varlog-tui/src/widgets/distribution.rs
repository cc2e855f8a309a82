//! Share of records per app as horizontal bars.

use super::render_empty;
use crate::data::ChartData;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
};

pub struct Distribution<'a> {
    data: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> Distribution<'a> {
    pub fn new(data: &'a ChartData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }
}

impl Widget for Distribution<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(" Records by app ", self.theme.title))
            .border_style(self.theme.border);
        if self.data.shares.is_empty() {
            render_empty(block, area, buf);
            return;
        }

        let bars: Vec<Bar> = self
            .data
            .shares
            .iter()
            .map(|share| {
                Bar::default()
                    .value(share.count as u64)
                    .label(Line::from(share.app.clone()))
                    .text_value(format!("{} ({:.1}%)", share.count, share.percent))
                    .style(self.theme.app_style(&share.app))
                    .value_style(self.theme.bar_value)
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .bar_style(self.theme.bar)
            .label_style(self.theme.bar_label)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
