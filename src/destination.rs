use crate::errors::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Maps source files to the paths their edited contents are written to.
///
/// Without an output root every file is edited in place. With one, the layout
/// below the common ancestor of the whole file set is mirrored under the root.
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    output_root: Option<PathBuf>,
    anchor: PathBuf,
}

impl DestinationResolver {
    /// Creates a resolver for one run's file set.
    ///
    /// The anchor is computed once here from `files` and reused for every file.
    pub fn new(output_root: Option<PathBuf>, files: &[PathBuf]) -> Self {
        let anchor = common_ancestor(files).unwrap_or_default();
        debug!(anchor = %anchor.display(), "resolved destination anchor");
        Self { output_root, anchor }
    }

    /// The directory that relative output paths are computed from.
    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    /// Computes the destination for `source` without touching the filesystem.
    pub fn destination_for(&self, source: &Path) -> Result<PathBuf> {
        let Some(root) = &self.output_root else {
            return Ok(source.to_path_buf());
        };

        let relative = source
            .strip_prefix(&self.anchor)
            .map_err(|_| Error::OutsideAnchor {
                path: source.to_path_buf(),
                anchor: self.anchor.clone(),
            })?;

        Ok(root.join(relative))
    }

    /// Computes the destination for `source` and creates any missing parent
    /// directories so the file can be written.
    pub fn prepare(&self, source: &Path) -> Result<PathBuf> {
        let destination = self.destination_for(source)?;
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(destination)
    }
}

/// Returns the deepest directory that contains every file in `files`.
///
/// Returns `None` for an empty set. Paths are compared component by component,
/// so `a/bc` is not treated as being inside `a/b`.
pub fn common_ancestor(files: &[PathBuf]) -> Option<PathBuf> {
    let mut parents = files
        .iter()
        .map(|file| file.parent().unwrap_or_else(|| Path::new("")));

    let first = parents.next()?;
    let mut shared: Vec<Component<'_>> = first.components().collect();

    for parent in parents {
        let matching = shared
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        shared.truncate(matching);
    }

    Some(shared.into_iter().collect())
}
