use std::io::Write;

use crate::command::{CommandOutcome, parse_command_text};
use crate::error::{AppError, AppResult};

use super::core::App;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub executed: usize,
    pub failed: usize,
    pub quit: bool,
}

impl App {
    /// Runs one command per line against the tab and writes what the page
    /// shows after each. Blank lines and `#` comments are skipped; a failing
    /// command is reported and the script carries on.
    pub fn run_script(&mut self, source: &str, out: &mut impl Write) -> AppResult<ScriptReport> {
        let mut report = ScriptReport::default();
        self.write_page(out)?;

        for (line_no, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            write_line(out, &format!("> {line}"))?;
            report.executed += 1;
            let result = parse_command_text(line).and_then(|command| self.execute(command));
            match result {
                Ok(result) => {
                    if let Some(output) = &result.output {
                        write_line(out, output)?;
                    }
                    if result.outcome == CommandOutcome::QuitRequested {
                        report.quit = true;
                        break;
                    }
                    if result.navigated {
                        self.write_page(out)?;
                    } else if !self.state.status.message.is_empty() {
                        write_line(out, &self.state.status.message)?;
                    }
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(line = line_no + 1, %err, "script command failed");
                    write_line(out, &format!("error (line {}): {err}", line_no + 1))?;
                }
            }
        }

        out.flush()
            .map_err(|source| AppError::io_with_context(source, "failed to flush script output"))?;
        Ok(report)
    }

    fn write_page(&self, out: &mut impl Write) -> AppResult<()> {
        let snapshot = self.tab.snapshot();
        let page = snapshot.current.as_ref().map_or("-", |current| current.page);
        write_line(
            out,
            &format!(
                "[{}] page={page} history={} renders={}",
                self.tab.location(),
                self.tab.history_len(),
                snapshot.render_count
            ),
        )?;
        for line in self.tab.mount_lines()? {
            let text = line.plain();
            if line.heading {
                write_line(out, &format!("  # {text}"))?;
            } else {
                write_line(out, &format!("  {text}"))?;
            }
        }
        Ok(())
    }
}

fn write_line(out: &mut impl Write, text: &str) -> AppResult<()> {
    writeln!(out, "{text}")
        .map_err(|source| AppError::io_with_context(source, "failed to write script output"))
}
