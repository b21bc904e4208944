use tui_input::Input;

use crate::command::{Command, CommandDispatchResult, dispatch};
use crate::config::Config;
use crate::error::AppResult;

use super::state::AppState;
use super::tab::Tab;

pub struct App {
    pub state: AppState,
    pub tab: Tab,
    pub config: Config,
    pub(crate) command_bar: Input,
}

impl App {
    pub fn new(start: &str) -> AppResult<Self> {
        let config = Config::load()?;
        Self::new_with_config(config, start)
    }

    pub fn new_with_config(config: Config, start: &str) -> AppResult<Self> {
        let tab = Tab::open(&config, start)?;
        let state = AppState {
            debug_status_visible: config.debug.enabled || tab.router().is_debug(),
            ..AppState::default()
        };
        tracing::info!(
            location = %tab.location(),
            keymap = %config.keymap.preset,
            "shell ready"
        );

        Ok(Self {
            state,
            tab,
            config,
            command_bar: Input::default(),
        })
    }

    pub fn execute(&mut self, command: Command) -> AppResult<CommandDispatchResult> {
        dispatch(&mut self.state, &mut self.tab, command)
    }

    pub fn command_bar_text(&self) -> &str {
        self.command_bar.value()
    }

    pub fn command_bar_cursor(&self) -> usize {
        self.command_bar.visual_cursor()
    }
}
