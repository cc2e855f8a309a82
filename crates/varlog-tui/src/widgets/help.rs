//! Keybinding overlay, drawn over whichever chart is active.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("1  2  3", "Per day / per app / distribution"),
    ("Tab  /  →", "Next chart"),
    ("Shift+Tab  /  ←", "Previous chart"),
    ("l", "Toggle log scale"),
    ("?  /  Esc", "Close this help"),
];

const WIDTH: u16 = 60;
const KEY_COLUMN: usize = 20;

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = BINDINGS.len() as u16 + 2;
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        let key_style = self.theme.title.add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<KEY_COLUMN$}"), key_style),
                    Span::raw(*action),
                ])
            })
            .collect();

        Clear.render(popup, buf);
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" varlog: keybindings (? to close) ")
                    .border_style(self.theme.border),
            )
            .render(popup, buf);
    }
}
