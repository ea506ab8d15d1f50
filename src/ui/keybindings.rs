// src/ui/keybindings.rs
//! Keyboard shortcuts for the transport controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::transport::TransportAction;

/// Actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Transport(TransportAction),
    /// Play when not playing, otherwise pause
    TogglePlay,
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char('p') => KeyAction::Transport(TransportAction::Play),
        KeyCode::Char(' ') => KeyAction::TogglePlay,
        KeyCode::Char('r') => KeyAction::Transport(TransportAction::Refresh),
        KeyCode::Char('m') => KeyAction::Transport(TransportAction::Mute),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
