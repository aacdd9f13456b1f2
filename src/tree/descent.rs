//! Recursive-descent tree builder over a real directory
//!
//! Classification comes from filesystem metadata, so no extension filtering applies.
//! An unreadable directory or entry aborts the whole build.

use crate::error::{ApiError, TreeError};
use crate::tree::node::Node;
use crate::tree::path;
use crate::tree::walker::WalkerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Tree builder that materializes one node per directory entry
pub struct DescentBuilder {
    root: PathBuf,
    config: WalkerConfig,
}

impl DescentBuilder {
    /// Create a new builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Set walker config (symlinks, ignore patterns, ordering)
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the nested tree rooted at the builder's directory
    ///
    /// The root node is named after the directory's final path component.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<Node, ApiError> {
        let start = Instant::now();
        info!("Starting directory descent");

        let canonical_root = path::canonicalize_root(&self.root)?;
        let mut ancestors = Vec::new();
        let tree = self
            .descend(&canonical_root, path::base_name(&canonical_root), &mut ancestors)
            .map_err(|e| {
                error!("Directory descent failed: {}", e);
                e
            })?;

        info!(
            node_count = tree.count(),
            file_count = tree.file_count(),
            duration_ms = start.elapsed().as_millis(),
            "Directory descent completed"
        );
        Ok(tree)
    }

    fn descend(
        &self,
        dir: &Path,
        name: String,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Node, TreeError> {
        debug!(path = %dir.display(), "Reading directory");

        if self.config.follow_symlinks {
            let canonical = dunce::canonicalize(dir).map_err(|e| TreeError::walk(dir, e))?;
            if ancestors.contains(&canonical) {
                return Err(TreeError::walk(
                    dir,
                    std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "filesystem loop detected",
                    ),
                ));
            }
            ancestors.push(canonical);
        }

        let mut entries = fs::read_dir(dir)
            .map_err(|e| TreeError::walk(dir, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TreeError::walk(dir, e))?;
        if self.config.sort_entries {
            entries.sort_by_key(|e| e.file_name());
        }

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let child_path = entry.path();
            let child_name = path::base_name(&child_path);
            if self.config.is_ignored(&child_name) {
                trace!(name = %child_name, "Ignoring entry");
                continue;
            }

            let is_dir = if self.config.follow_symlinks {
                fs::metadata(&child_path)
                    .map_err(|e| TreeError::walk(&child_path, e))?
                    .is_dir()
            } else {
                entry
                    .file_type()
                    .map_err(|e| TreeError::walk(&child_path, e))?
                    .is_dir()
            };

            let child = if is_dir {
                self.descend(&child_path, child_name, ancestors)?
            } else {
                Node::File { name: child_name }
            };
            children.push(child);
        }

        if self.config.follow_symlinks {
            ancestors.pop();
        }

        Ok(Node::Directory { name, children })
    }
}
