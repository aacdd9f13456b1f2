//! Filesystem-walk path source

use crate::error::ApiError;
use crate::source::PathSource;
use crate::tree::descent::DescentBuilder;
use crate::tree::flatten;
use crate::tree::walker::{Walker, WalkerConfig};
use crate::tree::{path, Node};
use std::path::PathBuf;
use tracing::debug;

/// Path source backed by a live directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    config: WalkerConfig,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }
}

impl PathSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn build_tree(&self) -> Result<Node, ApiError> {
        DescentBuilder::new(self.root.clone())
            .with_config(self.config.clone())
            .build()
    }

    /// Files plus an `EMPTY` sentinel path for each file-less directory
    fn flat_paths(&self) -> Result<Vec<String>, ApiError> {
        let root = path::canonicalize_root(&self.root)?;
        let entries = Walker::with_config(root, self.config.clone()).walk()?;
        debug!(entry_count = entries.len(), "Walked filesystem");
        Ok(flatten::sentinel_paths(&entries))
    }
}
