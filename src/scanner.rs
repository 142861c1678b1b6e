use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// The only file extension considered editable text.
pub const TEXT_EXTENSION: &str = "txt";

/// Finds every `.txt` file under `root`.
///
/// With `recursive` set, every subdirectory is walked regardless of depth;
/// otherwise only direct children of `root` are considered. A `root` that does
/// not exist or is not a directory yields an empty list, never an error.
///
/// The result keeps the order in which the filesystem enumerated the entries.
/// Callers must discover once per run and reuse the returned list.
pub fn discover(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!(root = %root.display(), "discovery root is not a directory");
        return Vec::new();
    }

    let walker = if recursive {
        WalkDir::new(root).min_depth(1)
    } else {
        WalkDir::new(root).min_depth(1).max_depth(1)
    };

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || entry.path().is_file())
        .filter(|entry| is_text_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Returns `true` when the file name ends in the text extension.
fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|ext| ext == TEXT_EXTENSION)
        .unwrap_or(false)
}
