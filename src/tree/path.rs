//! Path canonicalization and normalization utilities

use crate::error::PathSourceError;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Segment separator used in every emitted path, regardless of host
pub const SEPARATOR: char = '/';

/// Canonicalize a walk root
///
/// Fails with `RootNotFound` / `NotADirectory` before touching anything else.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, PathSourceError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PathSourceError::RootNotFound(path.to_path_buf()),
        _ => PathSourceError::IoError(e),
    })?;
    if !metadata.is_dir() {
        return Err(PathSourceError::NotADirectory(path.to_path_buf()));
    }

    // Use dunce for cross-platform canonicalization
    Ok(dunce::canonicalize(path)?)
}

/// Normalize a path string without filesystem access
///
/// Converts host separators to `/` and drops a leading `./` and trailing
/// separators. Segment bytes are kept as-is: names are appended to the fetch URL,
/// so they must match the stored file names exactly.
pub fn normalize_path_string(path: &str) -> String {
    let mut result = path.to_string();

    if MAIN_SEPARATOR != SEPARATOR {
        result = result.replace(MAIN_SEPARATOR, "/");
    }

    while let Some(rest) = result.strip_prefix("./") {
        result = rest.to_string();
    }
    while result.len() > 1 && result.ends_with(SEPARATOR) {
        result.pop();
    }

    result
}

/// Non-empty segments of a normalized path
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Slash-joined path of `path` relative to `root`
///
/// Returns `None` when `path` is not beneath `root`, and an empty string for
/// `root` itself.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Final component of a path, or an empty string for roots like `/`
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
