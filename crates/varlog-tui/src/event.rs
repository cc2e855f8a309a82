//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so the app never matches on crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)             | Event                |
//! |--------------------|----------------------|
//! | `q`, `Ctrl+c`      | `Quit`               |
//! | `1` `2` `3`        | `SelectTab(n - 1)`   |
//! | `Tab`, `→`         | `NextTab`            |
//! | `Shift+Tab`, `←`   | `PrevTab`            |
//! | `l`, `L`           | `ToggleLogScale`     |
//! | `?`                | `ToggleHelp`         |
//! | `Esc`              | `Escape`             |
//! | terminal resize    | `Resize(w, h)`       |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    NextTab,
    PrevTab,
    /// Jump straight to a tab by index.
    SelectTab(usize),
    ToggleLogScale,
    ToggleHelp,
    /// Close the help popup.
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for mouse events, focus changes and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Char(c @ '1'..='3') if key.modifiers == Mod::NONE => {
            Some(AppEvent::SelectTab(c as usize - '1' as usize))
        }
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::NextTab),
        BackTab => Some(AppEvent::PrevTab),
        Right if key.modifiers == Mod::NONE => Some(AppEvent::NextTab),
        Left if key.modifiers == Mod::NONE => Some(AppEvent::PrevTab),

        // Lowercase and uppercase both toggle; SHIFT may or may not be set
        Char('l') | Char('L') => Some(AppEvent::ToggleLogScale),

        Char('?') => Some(AppEvent::ToggleHelp),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
