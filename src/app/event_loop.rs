use std::time::Duration;

use crossterm::event;

use crate::command::{Command, CommandOutcome};
use crate::error::{AppError, AppResult};
use crate::ui::{draw_chrome, draw_command_bar, draw_page, split_layout};

use super::core::App;
use super::state::Mode;
use super::terminal_session::{TerminalSession, TerminalSurface};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(250);

enum LoopControl {
    Continue,
    Break,
}

impl App {
    /// Runs the terminal shell until the user quits.
    pub fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let result = self.run_loop(&mut session);
        session
            .restore()
            .map_err(|source| AppError::io_with_context(source, "failed to restore terminal"))?;
        result
    }

    fn run_loop(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.draw(session)?;
                needs_redraw = false;
            }

            let ready = event::poll(INPUT_POLL_TIMEOUT)
                .map_err(|source| AppError::io_with_context(source, "failed to poll input"))?;
            if !ready {
                continue;
            }
            let event = event::read()
                .map_err(|source| AppError::io_with_context(source, "failed to read input"))?;

            let outcome = self.handle_input_event(event);
            if outcome.quit_requested {
                break;
            }
            needs_redraw |= outcome.redraw;
            if let Some(command) = outcome.command
                && matches!(self.apply_command(command), LoopControl::Break)
            {
                break;
            }
        }
        tracing::info!("shell closed");
        Ok(())
    }

    /// Navigation failures are shown on the status row instead of ending the
    /// session.
    fn apply_command(&mut self, command: Command) -> LoopControl {
        match self.execute(command) {
            Ok(result) if result.outcome == CommandOutcome::QuitRequested => LoopControl::Break,
            Ok(_) => LoopControl::Continue,
            Err(err) => {
                tracing::warn!(%err, "command failed");
                self.state.status.message = format!("error: {err}");
                LoopControl::Continue
            }
        }
    }

    pub(crate) fn draw(&self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let lines = self.tab.page_lines();
        let links = self.tab.links();
        let focused = self.state.focus.and_then(|idx| links.get(idx).copied());
        let command_bar_open = self.state.mode == Mode::CommandBar;

        session
            .draw(|frame| {
                let layout =
                    split_layout(frame.area(), self.state.debug_status_visible, command_bar_open);
                draw_page(frame, layout.page, &lines, focused);
                draw_chrome(frame, layout.status, &self.state, &self.tab);
                if let Some(bar) = layout.command_bar {
                    draw_command_bar(frame, bar, self.command_bar_text(), self.command_bar_cursor());
                }
            })
            .map_err(|source| AppError::io_with_context(source, "failed to draw frame"))
    }
}
