use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use spanav::app::App;
use spanav::config::Config;
use spanav::error::{AppError, AppResult};
use spanav::logging::{self, LogTarget};

/// Terminal shell for a single-page site with client-side navigation.
#[derive(Debug, Parser)]
#[command(name = "spanav", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default search path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Location the tab opens with
    #[arg(long, value_name = "PATH", default_value = "/")]
    start: String,

    /// Run commands from FILE (`-` for stdin) instead of the terminal UI
    #[arg(long, value_name = "FILE")]
    script: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Turn on debug mode (verbose logs and the debug status row)
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<ExitCode> {
    let config = resolve_config(&cli)?;
    let target = log_target(cli.script.is_some(), config.debug.log_file.as_deref());
    let _log_guard = logging::init(&config.debug.log_filter, config.debug.enabled, target)?;

    let mut app = App::new_with_config(config, &cli.start)?;
    let Some(script) = cli.script.as_deref() else {
        app.run()?;
        return Ok(ExitCode::SUCCESS);
    };

    let source = read_script(script)?;
    let mut stdout = io::stdout().lock();
    let report = app.run_script(&source, &mut stdout)?;
    tracing::info!(
        executed = report.executed,
        failed = report.failed,
        "script finished"
    );
    Ok(if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn resolve_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) if !path.is_file() => {
            return Err(AppError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if cli.debug {
        config.debug.enabled = true;
    }
    if let Some(path) = &cli.log_file {
        config.debug.log_file = Some(path.clone());
    }
    Ok(config)
}

fn log_target(script_mode: bool, log_file: Option<&Path>) -> LogTarget {
    match (log_file, script_mode) {
        (Some(path), _) => LogTarget::File(path.to_path_buf()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Discard,
    }
}

fn read_script(source: &str) -> AppResult<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| AppError::io_with_context(err, "failed to read script from stdin"))?;
        return Ok(text);
    }
    std::fs::read_to_string(source)
        .map_err(|err| AppError::io_with_context(err, format!("failed to read script: {source}")))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use spanav::logging::LogTarget;

    use super::{Cli, log_target, resolve_config};

    #[test]
    fn cli_defaults_to_root_and_tui() {
        let cli = Cli::try_parse_from(["spanav"]).expect("defaults should parse");
        assert_eq!(cli.start, "/");
        assert!(cli.script.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn cli_accepts_all_flags() {
        let cli = Cli::try_parse_from([
            "spanav",
            "--start",
            "/about",
            "--script",
            "-",
            "--log-file",
            "/tmp/spanav.log",
            "--debug",
        ])
        .expect("flags should parse");
        assert_eq!(cli.start, "/about");
        assert_eq!(cli.script.as_deref(), Some("-"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/spanav.log")));
        assert!(cli.debug);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = Cli::try_parse_from(["spanav", "--config", "/definitely/not/here.toml"])
            .expect("flags should parse");
        let err = resolve_config(&cli).expect_err("missing explicit config");
        assert!(err.is_config());
    }

    #[test]
    fn logs_never_go_to_the_terminal_in_tui_mode() {
        assert_eq!(log_target(false, None), LogTarget::Discard);
        assert_eq!(log_target(true, None), LogTarget::Stderr);
        assert_eq!(
            log_target(false, Some(Path::new("run.log"))),
            LogTarget::File(PathBuf::from("run.log"))
        );
    }
}
