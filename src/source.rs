//! Path sources
//!
//! A path source supplies the set of paths a manifest describes and picks the tree
//! strategy that fits it: flat listings go through the trie builder, live
//! directories through recursive descent.

use crate::config::{FilelistConfig, SourceKind};
use crate::error::ApiError;
use crate::tree::Node;
use std::path::Path;

mod directory;
mod listing;

pub use directory::DirectorySource;
pub use listing::{parse_listing, parse_nul_listing, ListingSource};

/// Supplier of manifest paths
pub trait PathSource {
    /// Short description for logs and CLI output
    fn describe(&self) -> String;

    /// Nested tree rooted at the source's root directory
    fn build_tree(&self) -> Result<Node, ApiError>;

    /// Root-relative flat paths in discovery order
    fn flat_paths(&self) -> Result<Vec<String>, ApiError>;
}

/// Path source selected by configuration
pub fn from_config(config: &FilelistConfig, workspace_root: &Path) -> Box<dyn PathSource> {
    let source = &config.source;
    match source.kind {
        SourceKind::Git => Box::new(
            ListingSource::git(workspace_root, &source.git_ref, &source.prefix)
                .with_extension(&source.extension),
        ),
        SourceKind::Walk => Box::new(
            DirectorySource::new(source.resolve_root(workspace_root))
                .with_config(config.walker.clone()),
        ),
    }
}
