//! Input handling for the interactive browser.
//!
//! Key events map one-to-one onto browser commands. The browser has no
//! modal sub-states, so the mapping does not depend on any state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Available sorting keys for directory entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Sort by estimated tokens (largest first).
    #[default]
    Tokens,
    /// Sort by counted lines (largest first).
    Lines,
    /// Sort by size on disk (largest first).
    Size,
    /// Sort alphabetically by name.
    Name,
}

impl SortKey {
    /// Cycle to the next sort key.
    pub fn next(self) -> Self {
        match self {
            SortKey::Tokens => SortKey::Lines,
            SortKey::Lines => SortKey::Size,
            SortKey::Size => SortKey::Name,
            SortKey::Name => SortKey::Tokens,
        }
    }

    /// Direction a key starts in when selected.
    pub fn default_ascending(self) -> bool {
        matches!(self, SortKey::Name)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Tokens => "tokens",
            SortKey::Lines => "lines",
            SortKey::Size => "size",
            SortKey::Name => "name",
        }
    }
}

/// Commands that can be issued by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move selection up.
    MoveUp,
    /// Move selection down.
    MoveDown,
    /// Page up navigation.
    PageUp,
    /// Page down navigation.
    PageDown,
    /// Jump to the first item.
    GotoTop,
    /// Jump to the last item.
    GotoBottom,
    /// Enter the selected directory.
    Open,
    /// Go back to the parent directory.
    Back,
    /// Advance to the next sort key.
    CycleSort,
    /// Flip the direction of the current sort key.
    ReverseSort,
    /// Quit the browser.
    Quit,
    /// No operation - key was not recognized.
    Noop,
}

/// Handle a key event and return the corresponding command.
pub fn handle_key(key: KeyEvent) -> Command {
    match key.code {
        // Navigation - Back
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Command::Back,

        // Navigation - Down
        KeyCode::Char('j') | KeyCode::Down => Command::MoveDown,

        // Navigation - Up
        KeyCode::Char('k') | KeyCode::Up => Command::MoveUp,

        // Navigation - Open
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Command::Open,

        // Page navigation
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageUp,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageDown,

        // Jump to top / bottom
        KeyCode::Char('g') | KeyCode::Home => Command::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Command::GotoBottom,

        // Sorting
        KeyCode::Char('s') | KeyCode::Char('S') => Command::CycleSort,
        KeyCode::Char('r') => Command::ReverseSort,

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,

        _ => Command::Noop,
    }
}
