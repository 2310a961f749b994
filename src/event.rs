//! Keyboard event handling.
//!
//! This module manages keyboard input with Vim-style navigation:
//! - `j`/`k`: next/previous line
//! - `h`/`l`: scroll left/right
//! - `gg`/`G`: first/last line
//! - `]`/`[`: next/previous record header
//! - `Ctrl+D`/`Ctrl+U`, `PageDown`/`PageUp`: half/full page moves
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:h` or `:help`: show help
//!   - `:w <file>`: save the results
//!   - `:<number>`: go to line
//! - `/`: search forward, `?`: search backward
//! - `n`/`N`: repeat search in the same/opposite direction

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    Quit,
    MoveUp,
    MoveDown,
    ScrollLeft,
    ScrollRight,
    /// Go to first line (gg)
    GotoTop,
    /// Go to last line (G)
    GotoBottom,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    /// Jump to next record header (])
    NextRecord,
    /// Jump to previous record header ([)
    PreviousRecord,
    /// Pending 'g' key for g-commands
    PendingG,
    EnterCommandMode,
    CommandChar(char),
    ExecuteCommand,
    CancelCommand,
    CommandBackspace,
    /// Enter search mode (forward with /)
    EnterSearchMode,
    /// Enter search mode (backward with ?)
    EnterSearchBackward,
    SearchChar(char),
    ExecuteSearch,
    CancelSearch,
    SearchBackspace,
    /// Find next match (n)
    FindNext,
    /// Find previous match (N)
    FindPrevious,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool, pending_g: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, show_help, pending_g),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool, pending_g: bool) -> Action {
    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    if pending_g {
        return match key.code {
            KeyCode::Char('g') => Action::GotoTop,
            _ => Action::None,
        };
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
        AppMode::Search(_) | AppMode::SearchBackward(_) => handle_search_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Action::Quit,
            KeyCode::Char('u') => return Action::HalfPageUp,
            KeyCode::Char('d') => return Action::HalfPageDown,
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('h') | KeyCode::Left => Action::ScrollLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::ScrollRight,

        KeyCode::Char('g') => Action::PendingG,
        KeyCode::Char('G') => Action::GotoBottom,
        KeyCode::Home => Action::GotoTop,
        KeyCode::End => Action::GotoBottom,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        KeyCode::Char(']') => Action::NextRecord,
        KeyCode::Char('[') => Action::PreviousRecord,

        KeyCode::Char(':') => Action::EnterCommandMode,

        KeyCode::Char('/') => Action::EnterSearchMode,
        KeyCode::Char('?') => Action::EnterSearchBackward,
        KeyCode::Char('n') => Action::FindNext,
        KeyCode::Char('N') => Action::FindPrevious,

        _ => Action::None,
    }
}

fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

fn handle_search_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteSearch,
        KeyCode::Esc => Action::CancelSearch,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    if action != Action::PendingG {
        state.pending_g = false;
    }

    match action {
        Action::None => {}
        Action::Quit => state.should_quit = true,
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::ScrollLeft => state.scroll_left(),
        Action::ScrollRight => state.scroll_right(),
        Action::GotoTop => state.goto_top(),
        Action::GotoBottom => state.goto_bottom(),
        Action::HalfPageUp => state.half_page_up(),
        Action::HalfPageDown => state.half_page_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::NextRecord => state.next_record(),
        Action::PreviousRecord => state.previous_record(),
        Action::PendingG => state.set_pending_g(),
        Action::EnterCommandMode => state.enter_command_mode(),
        Action::CommandChar(c) => state.command_input(c),
        Action::ExecuteCommand => state.execute_command(),
        Action::CancelCommand => state.cancel_command(),
        Action::CommandBackspace => state.command_backspace(),
        Action::EnterSearchMode => state.enter_search_mode(false),
        Action::EnterSearchBackward => state.enter_search_mode(true),
        Action::SearchChar(c) => state.search_input(c),
        Action::ExecuteSearch => state.execute_search(),
        Action::CancelSearch => state.cancel_search(),
        Action::SearchBackspace => state.search_backspace(),
        Action::FindNext => state.find_next(),
        Action::FindPrevious => state.find_previous(),
        Action::DismissHelp => state.dismiss_help(),
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}
