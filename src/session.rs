//! Drives one invocation from discovery to the final summary.
//!
//! A run moves through `Discovering`, then either ends early (no files found, or
//! the operator declined) or goes on to `Processing` and `Summarizing`. Any error
//! that escapes the per-file loop aborts the run and is written to the run log.

use crate::config::Settings;
use crate::errors::Result;
use crate::prompt;
use crate::report::{self, RunContext};
use crate::runner::{BatchRunner, RunOptions, RunResult};
use crate::scanner::{self, TEXT_EXTENSION};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};

/// How a run that did not hit a fatal error ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Discovery found no text files.
    NothingFound,
    /// The operator declined at the confirmation prompt.
    Cancelled,
    /// Every discovered file was attempted.
    Completed(RunResult),
}

/// Runs discovery, confirmation, editing and the summary against the given
/// input and output streams.
pub fn execute<R: BufRead, W: Write>(
    settings: &Settings,
    ctx: &RunContext,
    input: &mut R,
    output: &mut W,
    progress: ProgressBar,
) -> Result<Outcome> {
    debug!(root = %settings.root.display(), recursive = settings.recursive, "discovering files");
    let files = scanner::discover(&settings.root, settings.recursive);

    if files.is_empty() {
        writeln!(
            output,
            "No .{} files found in {}{}",
            TEXT_EXTENSION,
            settings.root.display(),
            if settings.recursive {
                " and its subdirectories"
            } else {
                ""
            }
        )?;
        return Ok(Outcome::NothingFound);
    }

    let proceed = if settings.assume_yes {
        prompt::preview(&files, output)?;
        true
    } else {
        prompt::confirm(&files, input, output)?
    };

    if !proceed {
        writeln!(output, "Operation cancelled by user.")?;
        return Ok(Outcome::Cancelled);
    }

    info!(files = files.len(), dry_run = settings.dry_run, "processing files");
    progress.set_length(files.len() as u64);
    let options = RunOptions {
        dry_run: settings.dry_run,
    };
    let result = BatchRunner::new(&settings.spec, &files, options).run(&files, &progress);

    for destination in &result.planned {
        writeln!(output, "Would write {}", destination.display())?;
    }

    report::summarize(ctx, &result, output)?;
    Ok(Outcome::Completed(result))
}

/// The main entry point for an edit run on the real terminal.
///
/// A fatal error is printed, written to the run log, and returned.
pub fn run_edit(settings: Settings, ctx: RunContext, show_progress: bool) -> Result<Outcome> {
    let progress = if show_progress {
        create_progress_bar()
    } else {
        ProgressBar::hidden()
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let outcome = execute(&settings, &ctx, &mut input, &mut output, progress);
    finish(&ctx, outcome, &mut output)
}

/// Reports a fatal error and writes it to the run log.
///
/// The original error is returned even when the log cannot be written.
fn finish<W: Write>(ctx: &RunContext, outcome: Result<Outcome>, output: &mut W) -> Result<Outcome> {
    let err = match outcome {
        Ok(outcome) => return Ok(outcome),
        Err(err) => err,
    };

    let _ = writeln!(output, "An error occurred: {err}");
    if let Err(log_err) = report::write_fatal_log(ctx, &err) {
        error!(log = %ctx.log_path().display(), "could not write run log: {log_err}");
        eprintln!("Could not write {}: {log_err}", ctx.log_path().display());
    }
    Err(err)
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditSpec;
    use crate::errors::Error;
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn settings(root: &Path, log_dir: &Path, spec: EditSpec) -> Settings {
        Settings {
            root: root.to_path_buf(),
            spec,
            recursive: false,
            log_dir: log_dir.to_path_buf(),
            assume_yes: false,
            dry_run: false,
        }
    }

    fn run(settings: &Settings, answers: &str) -> (Result<Outcome>, String, RunContext) {
        let ctx = RunContext::new(&settings.log_dir);
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = execute(settings, &ctx, &mut input, &mut output, ProgressBar::hidden());
        (outcome, String::from_utf8(output).unwrap(), ctx)
    }

    #[test]
    fn test_end_to_end_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let note = temp_dir.path().join("note.txt");
        fs::write(&note, "hello world").unwrap();
        let spec = EditSpec::new("world", "there", Some(">> ".into()), None, None).unwrap();
        let logs = TempDir::new().unwrap();
        let settings = settings(temp_dir.path(), logs.path(), spec);

        let (outcome, output, ctx) = run(&settings, "y\n");

        match outcome.unwrap() {
            Outcome::Completed(result) => {
                assert_eq!(result.succeeded, 1);
                assert_eq!(result.failed, 0);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(fs::read_to_string(&note).unwrap(), ">> hello there");
        assert!(output.contains("Successfully processed: 1 files"));
        assert!(!ctx.log_path().exists());
    }

    #[test]
    fn test_declining_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let note = temp_dir.path().join("note.txt");
        fs::write(&note, "hello world").unwrap();
        let out = temp_dir.path().join("out");
        let spec = EditSpec::new("world", "there", None, None, Some(out.clone())).unwrap();
        let logs = TempDir::new().unwrap();
        let settings = settings(temp_dir.path(), logs.path(), spec);
        let before: Vec<PathBuf> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();

        let (outcome, output, _) = run(&settings, "n\n");

        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
        assert!(output.contains("Operation cancelled by user."));
        assert_eq!(fs::read_to_string(&note).unwrap(), "hello world");
        assert!(!out.exists());
        let after: Vec<PathBuf> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(before, after);
        assert_eq!(fs::read_dir(logs.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_directory_ends_quietly() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), "").unwrap();
        let spec = EditSpec::new("a", "b", None, None, None).unwrap();
        let mut settings = settings(temp_dir.path(), temp_dir.path(), spec);
        settings.recursive = true;

        let (outcome, output, _) = run(&settings, "");

        assert_eq!(outcome.unwrap(), Outcome::NothingFound);
        assert!(output.contains("No .txt files found in"));
        assert!(output.contains("and its subdirectories"));
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let spec = EditSpec::new("a", "b", None, None, None).unwrap();
        let settings = settings(&temp_dir.path().join("missing"), temp_dir.path(), spec);

        let (outcome, _, _) = run(&settings, "");

        assert_eq!(outcome.unwrap(), Outcome::NothingFound);
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        let spec = EditSpec::new("a", "b", None, None, None).unwrap();
        let logs = TempDir::new().unwrap();
        let mut settings = settings(temp_dir.path(), logs.path(), spec);
        settings.assume_yes = true;

        let (outcome, output, _) = run(&settings, "");

        assert!(matches!(outcome.unwrap(), Outcome::Completed(_)));
        assert!(output.contains("Found 1 .txt files to process:"));
        assert!(!output.contains("Proceed with editing"));
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "b");
    }

    #[test]
    fn test_per_file_failure_writes_log() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");
        fs::write(&good, "x").unwrap();
        fs::write(&bad, [0xc3, 0x28]).unwrap();
        let spec = EditSpec::new("x", "y", None, None, None).unwrap();
        let logs = TempDir::new().unwrap();
        let settings = settings(temp_dir.path(), logs.path(), spec);

        let (outcome, output, ctx) = run(&settings, "yes\n");

        assert!(matches!(outcome.unwrap(), Outcome::Completed(r) if r.succeeded == 1 && r.failed == 1));
        assert!(output.contains("Errors encountered: 1 files"));
        let log = fs::read_to_string(ctx.log_path()).unwrap();
        let entries: Vec<&str> = log
            .lines()
            .filter(|line| line.starts_with("Error processing "))
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains(&bad.display().to_string()));
    }

    #[test]
    fn test_closed_input_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let note = temp_dir.path().join("note.txt");
        fs::write(&note, "keep").unwrap();
        let spec = EditSpec::new("keep", "lose", None, None, None).unwrap();
        let settings = settings(temp_dir.path(), temp_dir.path(), spec);

        let (outcome, _, _) = run(&settings, "");

        assert!(outcome.is_err());
        assert_eq!(fs::read_to_string(&note).unwrap(), "keep");
    }

    #[test]
    fn test_dry_run_lists_destinations() {
        let temp_dir = TempDir::new().unwrap();
        let note = temp_dir.path().join("note.txt");
        fs::write(&note, "hello world").unwrap();
        let spec = EditSpec::new("world", "there", None, None, None).unwrap();
        let logs = TempDir::new().unwrap();
        let mut settings = settings(temp_dir.path(), logs.path(), spec);
        settings.dry_run = true;

        let (outcome, output, _) = run(&settings, "y\n");

        assert!(matches!(outcome.unwrap(), Outcome::Completed(r) if r.succeeded == 1));
        assert!(output.contains(&format!("Would write {}", note.display())));
        assert_eq!(fs::read_to_string(&note).unwrap(), "hello world");
    }

    #[test]
    fn test_fatal_error_is_logged() {
        let logs = TempDir::new().unwrap();
        let ctx = RunContext::new(logs.path());
        let mut output = Vec::new();

        let err = finish(&ctx, Err(Error::PromptClosed), &mut output).unwrap_err();

        assert!(matches!(err, Error::PromptClosed));
        assert!(String::from_utf8(output).unwrap().contains("An error occurred:"));
        let log = fs::read_to_string(ctx.log_path()).unwrap();
        assert!(log.contains("Fatal error: Input closed before confirmation was given"));
    }

    #[test]
    fn test_unwritable_log_keeps_original_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = RunContext::new(temp_dir.path().join("no-such-dir"));
        let mut output = Vec::new();

        let err = finish(&ctx, Err(Error::PromptClosed), &mut output).unwrap_err();

        assert!(matches!(err, Error::PromptClosed));
        assert!(!ctx.log_path().exists());
    }
}
