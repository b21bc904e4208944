//! Subscriber setup for the binary.
//!
//! The terminal UI owns the screen, so in TUI mode events go to a log file
//! (or nowhere); script mode writes to stderr next to the script output.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{AppError, AppResult};

const DEBUG_DIRECTIVE: &str = "spanav=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

/// Keeps the background file writer alive. Drop it last so buffered events
/// are flushed.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directives for a base filter, raised to debug for this crate when
/// debug mode is on.
pub fn filter_directives(base: &str, debug: bool) -> String {
    let base = base.trim();
    match (base.is_empty(), debug) {
        (true, true) => DEBUG_DIRECTIVE.to_string(),
        (true, false) => "spanav=info".to_string(),
        (false, true) => format!("{base},{DEBUG_DIRECTIVE}"),
        (false, false) => base.to_string(),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured
/// filter when set.
pub fn init(base_filter: &str, debug: bool, target: LogTarget) -> AppResult<LogGuard> {
    let directives = filter_directives(base_filter, debug);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let file = match target {
        LogTarget::Discard => return Ok(LogGuard { _file: None }),
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|err| AppError::config(format!("failed to install logger: {err}")))?;
            None
        }
        LogTarget::File(path) => {
            let (dir, file_name) = split_log_path(&path)?;
            std::fs::create_dir_all(&dir).map_err(|source| {
                AppError::io_with_context(
                    source,
                    format!("failed to create log directory: {}", dir.display()),
                )
            })?;
            let appender = tracing_appender::rolling::never(&dir, &file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|err| AppError::config(format!("failed to install logger: {err}")))?;
            Some(guard)
        }
    };

    tracing::debug!(filter = %directives, "logging initialized");
    Ok(LogGuard { _file: file })
}

fn split_log_path(path: &Path) -> AppResult<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            AppError::invalid_argument(format!("log file path has no file name: {}", path.display()))
        })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_string()))
}
