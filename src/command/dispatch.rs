use crate::app::{AppState, Mode, Tab};
use crate::error::AppResult;
use crate::host::ClickOutcome;

use super::core::{focus_next, focus_prev, set_debug_status_visible};
use super::types::{Command, CommandOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    /// Location or rendered page changed.
    pub navigated: bool,
    /// Text the command produced for the user, e.g. the router state.
    pub output: Option<String>,
}

pub fn dispatch(app: &mut AppState, tab: &mut Tab, cmd: Command) -> AppResult<CommandDispatchResult> {
    let before = NavMark::of(tab);
    let action_id = cmd.action_id();
    app.status.last_action_id = Some(action_id);
    let mut output = None;

    let outcome = match cmd {
        Command::ClickLink { target } => {
            let clicked = tab.click_link(&target)?;
            describe_click(app, tab, &clicked)
        }
        Command::Back => traverse(app, tab.back()?, "back", "oldest"),
        Command::Forward => traverse(app, tab.forward()?, "forward", "newest"),
        Command::Go { path } => {
            tab.go(&path)?;
            app.status.message = format!("loaded {path}");
            CommandOutcome::Applied
        }
        Command::FocusNext => focus_next(app, tab.links().len()),
        Command::FocusPrev => focus_prev(app, tab.links().len()),
        Command::Activate => {
            let links = tab.links();
            match app.focus.and_then(|idx| links.get(idx).copied()) {
                Some(link) => {
                    let clicked = tab.click(link)?;
                    describe_click(app, tab, &clicked)
                }
                None => {
                    app.status.message = "no link focused".to_string();
                    CommandOutcome::Noop
                }
            }
        }
        Command::State => {
            let snapshot = tab.snapshot();
            app.status.message = snapshot.summary();
            output = Some(snapshot.to_json());
            CommandOutcome::Applied
        }
        Command::DebugToggle => {
            let visible = !app.debug_status_visible;
            set_debug_status_visible(app, visible)
        }
        Command::OpenCommandBar => {
            app.mode = Mode::CommandBar;
            app.status.message.clear();
            CommandOutcome::Applied
        }
        Command::Cancel => {
            app.mode = Mode::Normal;
            app.status.message = "canceled current mode".to_string();
            CommandOutcome::Applied
        }
        Command::Quit => {
            app.status.message = "quit requested".to_string();
            CommandOutcome::QuitRequested
        }
    };

    let navigated = NavMark::of(tab) != before;
    if navigated {
        app.focus = None;
    }
    tracing::debug!(
        command = action_id.as_str(),
        ?outcome,
        navigated,
        location = %tab.location(),
        "command dispatched"
    );

    Ok(CommandDispatchResult {
        outcome,
        navigated,
        output,
    })
}

/// Enough of the tab's state to tell whether a command moved it.
#[derive(Debug, PartialEq, Eq)]
struct NavMark {
    location: String,
    history_len: usize,
    renders: u64,
    boots: usize,
}

impl NavMark {
    fn of(tab: &Tab) -> Self {
        Self {
            location: tab.location(),
            history_len: tab.history_len(),
            renders: tab.router().render_count(),
            boots: tab.boots(),
        }
    }
}

fn describe_click(app: &mut AppState, tab: &Tab, clicked: &ClickOutcome) -> CommandOutcome {
    if let Some(href) = &clicked.full_load {
        app.status.message = format!("full load {href}");
        return CommandOutcome::Applied;
    }
    if clicked.default_prevented {
        app.status.message = format!("navigated to {}", tab.location());
        return CommandOutcome::Applied;
    }
    app.status.message = "click had no effect".to_string();
    CommandOutcome::Noop
}

fn traverse(app: &mut AppState, moved: bool, direction: &str, end: &str) -> CommandOutcome {
    if moved {
        app.status.message = format!("history {direction}");
        CommandOutcome::Applied
    } else {
        app.status.message = format!("already at {end} history entry");
        CommandOutcome::Noop
    }
}
