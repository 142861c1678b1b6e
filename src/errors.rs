use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `caption-edit`.
///
/// Per-file failures are rendered with `Display` into the run log; anything
/// that escapes the per-file loop is fatal for the run.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that occurred while parsing a YAML configuration file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// The search string was empty, which has no well-defined replacement.
    #[error("Target string must not be empty")]
    EmptyTarget,

    /// Standard input was closed before the operator answered the prompt.
    #[error("Input closed before confirmation was given")]
    PromptClosed,

    /// A source file does not live under the directory used to mirror the output tree.
    #[error("{path} is not located under {anchor}")]
    OutsideAnchor { path: PathBuf, anchor: PathBuf },

    /// An error related to persisting a temporary file.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),
}

/// A convenient type alias for `Result<T, caption_edit::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}
