//! `caption-edit` is a library for bulk editing plain-text files.
//!
//! It provides the core logic for the `caption-edit` command-line tool but can
//! also be used as a standalone library. The main components are:
//!
//! - `scanner`: finds the `.txt` files under a directory, optionally recursively.
//! - `editor`: the pure find/replace, prepend and append transform and the
//!   `EditSpec` describing it.
//! - `destination`: decides where each edited file is written, either in place
//!   or mirrored under an output directory.
//! - `runner`: applies an edit to every file, isolating per-file failures.
//! - `prompt`: previews the file set and asks for confirmation.
//! - `report`: prints the run summary and writes the timestamped error log.
//! - `session`: ties the steps together for one invocation.
//!
//! Files are processed one at a time and each write goes through a temporary
//! file that is renamed over the destination.

pub mod cli;
pub mod config;
pub mod destination;
pub mod editor;
pub mod errors;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod session;

// Re-export main types for easier access by library users.
pub use editor::{transform, EditSpec};
pub use errors::{Error, Result};
pub use report::RunContext;
pub use runner::{BatchRunner, RunResult};
pub use scanner::discover;
pub use session::Outcome;
