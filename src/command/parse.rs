use crate::error::{AppError, AppResult};

use super::spec::find_command_spec;
use super::types::Command;

pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = match trimmed.find(char::is_whitespace) {
        Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
        None => (trimmed, ""),
    };

    if find_command_spec(id).is_none() {
        return Err(AppError::invalid_argument(format!("unknown command `{id}`")));
    }

    match id {
        "click" => parse_click(args_text),
        "back" => parse_no_args(id, args_text, Command::Back),
        "forward" => parse_no_args(id, args_text, Command::Forward),
        "go" => parse_go(args_text),
        "focus-next" => parse_no_args(id, args_text, Command::FocusNext),
        "focus-prev" => parse_no_args(id, args_text, Command::FocusPrev),
        "activate" => parse_no_args(id, args_text, Command::Activate),
        "state" => parse_no_args(id, args_text, Command::State),
        "debug-toggle" => parse_no_args(id, args_text, Command::DebugToggle),
        "command-bar" => parse_no_args(id, args_text, Command::OpenCommandBar),
        "cancel" => parse_no_args(id, args_text, Command::Cancel),
        "quit" => parse_no_args(id, args_text, Command::Quit),
        _ => Err(AppError::invalid_argument(
            "command parser is out of sync with registry",
        )),
    }
}

fn parse_no_args(id: &str, args_text: &str, cmd: Command) -> AppResult<Command> {
    if args_text.is_empty() {
        return Ok(cmd);
    }

    Err(AppError::invalid_argument(format!(
        "{id} does not accept arguments"
    )))
}

/// The link may be an href or its visible text, which can contain spaces.
fn parse_click(args_text: &str) -> AppResult<Command> {
    let target = unquote(args_text.trim());
    if target.is_empty() {
        return Err(AppError::invalid_argument(
            "click requires 1 argument: link",
        ));
    }

    Ok(Command::ClickLink {
        target: target.to_string(),
    })
}

fn parse_go(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(path) = parts.next() else {
        return Err(AppError::invalid_argument("go requires 1 argument: path"));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument("go accepts exactly 1 argument"));
    }
    if !path.starts_with('/') {
        return Err(AppError::invalid_argument("go path must start with `/`"));
    }

    Ok(Command::Go {
        path: path.to_string(),
    })
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    text
}
