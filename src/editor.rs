use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

/// The edit applied to every file in a run.
///
/// Built once from operator input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSpec {
    target: String,
    replacement: String,
    prefix: Option<String>,
    suffix: Option<String>,
    destination_root: Option<PathBuf>,
}

impl EditSpec {
    /// Creates a new `EditSpec`.
    ///
    /// Empty prefix and suffix strings are treated as absent. An empty `target`
    /// is rejected with [`Error::EmptyTarget`].
    pub fn new(
        target: impl Into<String>,
        replacement: impl Into<String>,
        prefix: Option<String>,
        suffix: Option<String>,
        destination_root: Option<PathBuf>,
    ) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(Error::EmptyTarget);
        }

        Ok(Self {
            target,
            replacement: replacement.into(),
            prefix: prefix.filter(|p| !p.is_empty()),
            suffix: suffix.filter(|s| !s.is_empty()),
            destination_root,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Where edited files are mirrored to, or `None` for in-place edits.
    pub fn destination_root(&self) -> Option<&Path> {
        self.destination_root.as_deref()
    }

    /// Applies this edit to a file's contents.
    pub fn apply(&self, content: &str) -> String {
        transform(
            content,
            &self.target,
            &self.replacement,
            self.prefix(),
            self.suffix(),
        )
    }
}

/// Rewrites `content` in three fixed steps.
///
/// 1. Every non-overlapping occurrence of `target` is replaced with
///    `replacement`, scanning left to right. An empty `target` replaces nothing.
/// 2. A non-empty `prefix` is placed in front of the result.
/// 3. A non-empty `suffix` is placed after it.
///
/// Running the same edit twice is not idempotent: the prefix and suffix are added
/// again, and a `replacement` that contains `target` is substituted again.
pub fn transform(
    content: &str,
    target: &str,
    replacement: &str,
    prefix: Option<&str>,
    suffix: Option<&str>,
) -> String {
    let prefix = prefix.unwrap_or_default();
    let suffix = suffix.unwrap_or_default();

    let substituted = if target.is_empty() {
        content.to_string()
    } else {
        content.replace(target, replacement)
    };

    let mut output = String::with_capacity(prefix.len() + substituted.len() + suffix.len());
    output.push_str(prefix);
    output.push_str(&substituted);
    output.push_str(suffix);
    output
}
