//! Tab bar widget: the strip of chart tabs at the top of the screen.

use crate::app::ChartTab;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// The active tab is highlighted; a `log` marker shows when the y axes are
/// log-scaled. Keybinding hints are right-aligned in the same row.
pub struct TabBar<'a> {
    active: ChartTab,
    log_scale: bool,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: ChartTab, log_scale: bool, theme: &'a Theme) -> Self {
        Self {
            active,
            log_scale,
            theme,
        }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = ChartTab::ALL
            .iter()
            .enumerate()
            .map(|(idx, tab)| Line::from(format!(" {}:{} ", idx + 1, tab.title())))
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(self.theme.active_tab)
            .divider("")
            .render(area, buf);

        let hint = if self.log_scale {
            " [log]  q:quit  ?:help "
        } else {
            " q:quit  ?:help "
        };
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
