//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an intent.
///
/// Arrows, WASD and IJKL steer; `q` and Ctrl-C are handled by [`should_quit`].
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'i' | 'I') => Some(Intent::MoveUp),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'j' | 'J') => Some(Intent::MoveLeft),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'k' | 'K') => Some(Intent::MoveDown),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Intent::MoveRight),

        KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::Confirm),
        KeyCode::Char('p' | 'P') => Some(Intent::TogglePause),
        KeyCode::Char('m' | 'M') => Some(Intent::ToggleMute),
        KeyCode::Char('r' | 'R') => Some(Intent::Restart),
        KeyCode::Esc => Some(Intent::Escape),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
