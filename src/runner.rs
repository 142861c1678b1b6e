use crate::destination::DestinationResolver;
use crate::editor::EditSpec;
use crate::errors::Result;
use indicatif::ProgressBar;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A file that could not be edited, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Tally of a batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub succeeded: usize,
    pub failed: usize,
    /// Failures in the order the files were processed.
    pub failures: Vec<FileFailure>,
    /// Destinations that would have been written, filled only in dry-run mode.
    pub planned: Vec<PathBuf>,
}

impl RunResult {
    fn record(&mut self, path: &Path, outcome: Result<PathBuf>, dry_run: bool) {
        match outcome {
            Ok(destination) => {
                debug!(source = %path.display(), destination = %destination.display(), "edited");
                self.succeeded += 1;
                if dry_run {
                    self.planned.push(destination);
                }
            }
            Err(err) => {
                warn!(source = %path.display(), "edit failed: {err}");
                self.failed += 1;
                self.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Options for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// If `true`, destinations are computed but nothing is written to disk.
    pub dry_run: bool,
}

/// Applies one [`EditSpec`] to a fixed list of files, one at a time.
pub struct BatchRunner<'a> {
    spec: &'a EditSpec,
    resolver: DestinationResolver,
    options: RunOptions,
}

impl<'a> BatchRunner<'a> {
    /// Creates a runner for `files`.
    ///
    /// The destination anchor is derived from `files`, so the same list must be
    /// passed to [`BatchRunner::run`].
    pub fn new(spec: &'a EditSpec, files: &[PathBuf], options: RunOptions) -> Self {
        let resolver = DestinationResolver::new(spec.destination_root().map(Path::to_path_buf), files);
        Self {
            spec,
            resolver,
            options,
        }
    }

    /// Processes every file in order.
    ///
    /// A failure on one file is recorded and never stops the rest of the batch.
    pub fn run(&self, files: &[PathBuf], progress: &ProgressBar) -> RunResult {
        let mut result = RunResult::default();

        for path in files {
            progress.set_message(path.display().to_string());
            result.record(path, self.process_file(path), self.options.dry_run);
            progress.inc(1);
        }

        progress.finish_and_clear();
        result
    }

    /// Reads, edits, and writes a single file, returning where it was written.
    ///
    /// In dry-run mode the destination is only computed.
    pub fn process_file(&self, path: &Path) -> Result<PathBuf> {
        let content = fs::read_to_string(path)?;
        let edited = self.spec.apply(&content);

        if self.options.dry_run {
            return self.resolver.destination_for(path);
        }

        let destination = self.resolver.prepare(path)?;
        write_atomic(&destination, &edited, path)?;
        Ok(destination)
    }
}

/// Replaces `path` with `contents` through a temporary file in the same directory.
///
/// A symlink at `path` is followed, so the file it points to is rewritten and the
/// link stays in place. An existing file keeps its permissions; a new file takes
/// the permissions of `permissions_from`. The temporary file is removed if
/// anything fails before it is persisted.
pub fn write_atomic(path: &Path, contents: &str, permissions_from: &Path) -> Result<()> {
    let target = match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(path)?,
        _ => path.to_path_buf(),
    };

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;

    let permissions = match fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => fs::metadata(permissions_from).ok().map(|m| m.permissions()),
    };
    if let Some(permissions) = permissions {
        fs::set_permissions(temp_file.path(), permissions)?;
    }

    temp_file.persist(&target)?;
    Ok(())
}
