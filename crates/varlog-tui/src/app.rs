//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    data::ChartData,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        app_breakdown::AppBreakdown, distribution::Distribution, help::HelpPopup,
        tab_bar::TabBar, timeline::Timeline,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    PerDay,
    PerApp,
    Distribution,
}

impl ChartTab {
    pub const ALL: [ChartTab; 3] = [ChartTab::PerDay, ChartTab::PerApp, ChartTab::Distribution];

    pub fn title(self) -> &'static str {
        match self {
            ChartTab::PerDay => "per day",
            ChartTab::PerApp => "per app",
            ChartTab::Distribution => "distribution",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ChartTab::PerDay => 0,
            ChartTab::PerApp => 1,
            ChartTab::Distribution => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tab: ChartTab,
    pub log_scale: bool,
    pub show_help: bool,
    pub quit: bool,
    pub theme: Theme,
    pub data: ChartData,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(data: ChartData, theme: Theme, log_scale: bool) -> Self {
        App {
            state: AppState {
                tab: ChartTab::PerDay,
                log_scale,
                show_help: false,
                quit: false,
                theme,
                data,
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                let app_event = match ct_event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Press => None,
                    other => event::to_app_event(other),
                };
                if let Some(ev) = app_event {
                    tracing::debug!(tab = ?self.state.tab, event = ?ev, "key event");
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Escape => s.show_help = false,
                AppEvent::Quit => s.quit = true,
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::NextTab => s.tab = s.tab.next(),
            AppEvent::PrevTab => s.tab = s.tab.prev(),
            AppEvent::SelectTab(idx) => {
                if let Some(tab) = ChartTab::ALL.get(idx) {
                    s.tab = *tab;
                }
            }
            AppEvent::ToggleLogScale => {
                s.log_scale = !s.log_scale;
                tracing::debug!(log_scale = s.log_scale, "scale toggled");
            }
            AppEvent::ToggleHelp => s.show_help = true,
            // Terminal resize is handled automatically by ratatui
            AppEvent::Escape | AppEvent::Resize(_, _) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // 1-line tab bar | chart | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let theme = &state.theme;
    frame.render_widget(TabBar::new(state.tab, state.log_scale, theme), vert[0]);

    match state.tab {
        ChartTab::PerDay => {
            frame.render_widget(Timeline::new(&state.data, state.log_scale, theme), vert[1])
        }
        ChartTab::PerApp => {
            frame.render_widget(AppBreakdown::new(&state.data, state.log_scale, theme), vert[1])
        }
        ChartTab::Distribution => {
            frame.render_widget(Distribution::new(&state.data, theme), vert[1])
        }
    }

    frame.render_widget(
        Paragraph::new(Line::styled(status_line(&state.data), theme.status)),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }
}

fn status_line(data: &ChartData) -> String {
    let Some(first) = data.first_day else {
        return " no records".to_string();
    };
    format!(
        " {} records over {} days from {} | {} days above {}",
        data.total,
        data.span_days,
        first.format("%Y-%m-%d"),
        data.busy_days.len(),
        data.threshold
    )
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
