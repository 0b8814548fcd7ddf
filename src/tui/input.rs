//! Input handling for TUI

use crate::app::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

/// Handle a key press in any mode
pub fn handle_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if handle_keybinding(app, modifiers, code) {
        return;
    }
    match app.mode {
        AppMode::Showcase => handle_showcase_input(app, code),
        AppMode::ThemePicker => handle_theme_picker_input(app, code),
    }
}

/// Handle global keybindings, returns true if handled
pub fn handle_keybinding(app: &mut App, modifiers: KeyModifiers, code: KeyCode) -> bool {
    match (modifiers, code) {
        // Ctrl+Q: Quit
        (KeyModifiers::CONTROL, KeyCode::Char('q' | 'Q')) => {
            app.should_quit = true;
            true
        }
        _ => false,
    }
}

/// Handle keys on the hero scene
pub fn handle_showcase_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('n') | KeyCode::Right => app.next_theme(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_theme(),
        KeyCode::Char('t') => app.open_theme_picker(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

/// Handle theme picker keyboard input
pub fn handle_theme_picker_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.picker_up(),
        KeyCode::Down | KeyCode::Char('j') => app.picker_down(),
        // Apply through the curtain
        KeyCode::Enter => app.apply_picked(),
        // Apply immediately
        KeyCode::Char(' ') => app.instant_apply(),
        KeyCode::Esc | KeyCode::Char('q' | 't') => app.close_theme_picker(),
        _ => {}
    }
}
