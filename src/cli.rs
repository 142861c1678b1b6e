use crate::config::{ConfigLoader, EditConfig, Settings};
use crate::editor::EditSpec;
use crate::errors::Result;
use clap::Parser;
use std::path::PathBuf;

/// Bulk edit .txt files in a directory.
///
/// Every `.txt` file found under `--path` has each occurrence of `--target`
/// replaced with `--swap`, then optionally gets text added to its start and end.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bulk edit .txt files in a directory",
    long_about = "caption-edit - find/replace, prepend and append across many .txt files.

Files are edited in place unless --output is given, in which case the directory
layout is mirrored under the output directory. A preview of the files is shown
and confirmation is requested before anything is written.

QUICK EXAMPLES:
  caption-edit --path ./captions --target cat --swap dog
  caption-edit --path ./captions --target cat --swap dog --prepend 'photo, ' --recursive
  caption-edit --path ./captions --target cat --swap dog --output ./edited --dry-run

If any file fails, details are written to caption_edit_log_<YYYYMMDD_HHMMSS>.txt."
)]
pub struct Args {
    /// Directory path to scan for .txt files.
    #[arg(long, required = true)]
    pub path: PathBuf,

    /// Target string to search for.
    #[arg(long, required = true, allow_hyphen_values = true)]
    pub target: String,

    /// Replacement string.
    #[arg(long, required = true, allow_hyphen_values = true)]
    pub swap: String,

    /// Text to add at the beginning of each file.
    #[arg(long, allow_hyphen_values = true)]
    pub prepend: Option<String>,

    /// Text to add at the end of each file.
    #[arg(long, allow_hyphen_values = true)]
    pub append: Option<String>,

    /// Recursively scan subdirectories.
    #[arg(long)]
    pub recursive: bool,

    /// Output directory for edited files (default is in-place editing).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML file with defaults for prepend, append, recursive, output and log_dir.
    #[arg(short, long, env = "CAPTION_EDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the error log is written to.
    #[arg(long, env = "CAPTION_EDIT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Show where each file would be written without modifying anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print debug diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Loads the config file named by `--config`, if any.
    pub fn load_config(&self) -> Result<EditConfig> {
        match &self.config {
            Some(config_path) => {
                let resolved = ConfigLoader::find_config(config_path, &self.path)?;
                println!("Using config file: {}", resolved.display());
                ConfigLoader::load_edit_config(&resolved)
            }
            None => Ok(EditConfig::default()),
        }
    }

    /// Merges these arguments over `config` into the settings for one run.
    ///
    /// Fails when the target string is empty.
    pub fn into_settings(self, config: EditConfig) -> Result<Settings> {
        let spec = EditSpec::new(
            self.target,
            self.swap,
            self.prepend.or(config.prepend),
            self.append.or(config.append),
            self.output.or(config.output),
        )?;

        Ok(Settings {
            root: self.path,
            spec,
            recursive: self.recursive || config.recursive.unwrap_or(false),
            log_dir: self
                .log_dir
                .or(config.log_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            assume_yes: self.yes,
            dry_run: self.dry_run,
        })
    }
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
