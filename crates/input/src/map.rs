//! Key mapping from terminal events to viewer commands.

use crate::types::{Command, OrbitDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to viewer commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Orbit
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Orbit(OrbitDirection::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Orbit(OrbitDirection::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Orbit(OrbitDirection::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Orbit(OrbitDirection::Down))
        }

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::ZoomOut),

        // Light
        KeyCode::Char(']') | KeyCode::Char('.') => Some(Command::LightRotatePositive),
        KeyCode::Char('[') | KeyCode::Char(',') => Some(Command::LightRotateNegative),

        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Short human-readable name for a key, for logging unmapped input.
pub fn describe_key(key: KeyEvent) -> String {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => format!("ctrl+{c}"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        other => format!("{other:?}").to_lowercase(),
    }
}
