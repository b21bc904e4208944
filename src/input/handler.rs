use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::app::{App, Mode};
use crate::command::{ActionId, Command, parse_command_text};

use super::keymap::{KeymapPreset, map_key_to_command_with_preset};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InputEventOutcome {
    pub(crate) redraw: bool,
    pub(crate) quit_requested: bool,
    pub(crate) command: Option<Command>,
}

impl App {
    pub(crate) fn handle_input_event(&mut self, event: Event) -> InputEventOutcome {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                if self.state.mode == Mode::CommandBar {
                    return self.handle_command_bar_key(key);
                }

                let preset = KeymapPreset::parse(&self.config.keymap.preset);
                match map_key_to_command_with_preset(key, self.state.mode, preset) {
                    Some(Command::Quit) => InputEventOutcome {
                        redraw: false,
                        quit_requested: true,
                        command: None,
                    },
                    Some(command) => InputEventOutcome {
                        redraw: true,
                        quit_requested: false,
                        command: Some(command),
                    },
                    None => InputEventOutcome::default(),
                }
            }
            Event::Resize(_, _) => InputEventOutcome {
                redraw: true,
                ..InputEventOutcome::default()
            },
            _ => InputEventOutcome::default(),
        }
    }

    fn handle_command_bar_key(&mut self, key: KeyEvent) -> InputEventOutcome {
        match key.code {
            KeyCode::Esc => {
                self.command_bar = Input::default();
                InputEventOutcome {
                    redraw: true,
                    quit_requested: false,
                    command: Some(Command::Cancel),
                }
            }
            KeyCode::Enter => {
                let text = self.command_bar.value().to_string();
                self.command_bar = Input::default();
                self.state.mode = Mode::Normal;
                match parse_command_text(&text) {
                    Ok(command) => InputEventOutcome {
                        redraw: true,
                        quit_requested: matches!(command, Command::Quit),
                        command: Some(command),
                    },
                    Err(err) => {
                        self.state.status.last_action_id = Some(ActionId::Input);
                        self.state.status.message = format!("input error: {err}");
                        InputEventOutcome {
                            redraw: true,
                            ..InputEventOutcome::default()
                        }
                    }
                }
            }
            _ => {
                let changed = self.command_bar.handle_event(&Event::Key(key)).is_some();
                InputEventOutcome {
                    redraw: changed,
                    ..InputEventOutcome::default()
                }
            }
        }
    }
}
