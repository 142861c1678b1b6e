use crate::errors::{Error, Result};
use crate::runner::RunResult;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-invocation values that would otherwise be read from the environment.
///
/// The log file name is derived from `started_at` exactly once, so every log
/// written during a run targets the same file.
#[derive(Debug, Clone)]
pub struct RunContext {
    started_at: DateTime<Local>,
    log_dir: PathBuf,
}

impl RunContext {
    /// Creates a context stamped with the current local time.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self::at(Local::now(), log_dir)
    }

    /// Creates a context for a fixed start time.
    pub fn at(started_at: DateTime<Local>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            started_at,
            log_dir: log_dir.into(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Full path of the error log for this run.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(format!(
            "caption_edit_log_{}.txt",
            self.started_at.format("%Y%m%d_%H%M%S")
        ))
    }
}

/// Prints the end-of-run counts and, when anything failed, writes the error log.
pub fn summarize<W: Write>(ctx: &RunContext, result: &RunResult, output: &mut W) -> Result<()> {
    writeln!(output, "\nOperation complete!")?;
    writeln!(output, "Successfully processed: {} files", result.succeeded)?;

    if result.has_failures() {
        let log_path = ctx.log_path();
        writeln!(output, "Errors encountered: {} files", result.failed)?;
        writeln!(output, "See {} for details", log_path.display())?;

        let lines: Vec<String> = result
            .failures
            .iter()
            .map(|f| format!("Error processing {}: {}", f.path.display(), f.message))
            .collect();
        write_log(ctx, &log_path, &lines)?;
    }

    Ok(())
}

/// Records an error that aborted the run.
pub fn write_fatal_log(ctx: &RunContext, err: &Error) -> Result<PathBuf> {
    let log_path = ctx.log_path();
    let lines = [format!("Fatal error: {err}"), format!("Details: {err:?}")];
    write_log(ctx, &log_path, &lines)?;
    Ok(log_path)
}

fn write_log(ctx: &RunContext, path: &Path, lines: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(
        writer,
        "Caption Edit Log - {}",
        ctx.started_at.format("%Y-%m-%d %H:%M:%S%.6f")
    )?;
    writeln!(writer, "{}", "=".repeat(50))?;
    writeln!(writer)?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    info!(log = %path.display(), entries = lines.len(), "wrote run log");
    Ok(())
}
