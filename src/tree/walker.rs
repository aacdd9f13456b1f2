//! Filesystem walker for flat enumeration of a directory tree

use crate::error::TreeError;
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry, addressed by its slash-separated path relative to the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File { path: String },
    Directory { path: String },
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::File { path } | Entry::Directory { path } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (unfollowed links are listed as files)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip, matched against whole path components
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Sort siblings by name instead of keeping filesystem enumeration order
    #[serde(default)]
    pub sort_entries: bool,
}

impl WalkerConfig {
    /// Whether an entry with this base name is skipped
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p == name)
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect all entries below the root
    ///
    /// Entries come out pre-order: a directory precedes its contents. Any unreadable
    /// entry aborts the walk.
    pub fn walk(&self) -> Result<Vec<Entry>, TreeError> {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| !self.should_ignore(e)) {
            let entry = entry.map_err(walk_error)?;
            let Some(path) = path::relative_slash_path(&self.root, entry.path()) else {
                continue;
            };

            if entry.file_type().is_dir() {
                entries.push(Entry::Directory { path });
            } else {
                entries.push(Entry::File { path });
            }
        }

        Ok(entries)
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0 && self.config.is_ignored(&entry.file_name().to_string_lossy())
    }
}

fn walk_error(error: walkdir::Error) -> TreeError {
    let path = error.path().map(Path::to_path_buf).unwrap_or_default();
    let source = match error.into_io_error() {
        Some(io) => io,
        None => std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected"),
    };
    TreeError::walk(path, source)
}
