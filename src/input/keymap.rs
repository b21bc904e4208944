use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

/// Keys typed into the command bar are edited there, never mapped.
pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    match mode {
        Mode::Normal => match preset {
            KeymapPreset::Default => map_normal_mode_key_default(key),
            KeymapPreset::Emacs => map_normal_mode_key_emacs(key),
        },
        Mode::CommandBar => None,
    }
}

fn map_normal_mode_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(Command::Back),
            KeyCode::Char('i') => Some(Command::Forward),
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Enter => Some(Command::Activate),
        KeyCode::Backspace => Some(Command::Back),
        KeyCode::Char(':') => Some(Command::OpenCommandBar),
        KeyCode::Char('d') => Some(Command::DebugToggle),
        KeyCode::Char('s') => Some(Command::State),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_normal_mode_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('x') => Some(Command::OpenCommandBar),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::FocusNext),
            KeyCode::Char('p') => Some(Command::FocusPrev),
            KeyCode::Char('g') => Some(Command::Cancel),
            _ => map_normal_mode_key_default(key),
        };
    }

    map_normal_mode_key_default(key)
}
