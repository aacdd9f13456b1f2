//! Listing-based path source: newline-delimited output of a version-control listing

use crate::error::{ApiError, PathSourceError};
use crate::source::PathSource;
use crate::tree::builder::{TrieBuilder, DEFAULT_FILE_EXTENSION};
use crate::tree::{path, Node};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum Listing {
    /// `git ls-tree --name-only -r <git_ref> <prefix>` run in `workspace`
    Git { workspace: PathBuf, git_ref: String },
    /// Pre-captured listing text
    Text(String),
}

/// Path source backed by a flat listing of repository-relative paths under a prefix
#[derive(Debug, Clone)]
pub struct ListingSource {
    listing: Listing,
    prefix: String,
    extension: String,
}

impl ListingSource {
    /// List tracked files under `prefix` at `git_ref` in the repository at `workspace`
    pub fn git(
        workspace: impl Into<PathBuf>,
        git_ref: impl Into<String>,
        prefix: impl AsRef<str>,
    ) -> Self {
        Self {
            listing: Listing::Git {
                workspace: workspace.into(),
                git_ref: git_ref.into(),
            },
            prefix: normalize_prefix(prefix.as_ref()),
            extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }

    /// Use already-captured listing text
    pub fn from_text(text: impl Into<String>, prefix: impl AsRef<str>) -> Self {
        Self {
            listing: Listing::Text(text.into()),
            prefix: normalize_prefix(prefix.as_ref()),
            extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }

    /// Override the extension that marks a leaf as a file
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Name of the tree root: the prefix's final segment
    pub fn root_name(&self) -> &str {
        self.prefix.rsplit('/').next().unwrap_or_default()
    }

    /// Listed paths relative to the prefix, in listing order
    pub fn relative_paths(&self) -> Result<Vec<String>, PathSourceError> {
        let entries = self.read_listing()?;
        debug!(entry_count = entries.len(), "Parsed listing");

        entries
            .iter()
            .map(|entry| self.strip_prefix(entry))
            .collect()
    }

    fn strip_prefix(&self, line: &str) -> Result<String, PathSourceError> {
        let normalized = path::normalize_path_string(line);
        if self.prefix.is_empty() {
            return Ok(normalized);
        }
        normalized
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
            .ok_or_else(|| PathSourceError::OutsidePrefix {
                path: normalized.clone(),
                prefix: self.prefix.clone(),
            })
    }

    /// Raw listed paths, one per entry
    ///
    /// Git output is NUL-delimited so paths come back verbatim instead of C-quoted.
    fn read_listing(&self) -> Result<Vec<String>, PathSourceError> {
        match &self.listing {
            Listing::Text(text) => Ok(parse_listing(text)
                .into_iter()
                .map(str::to_string)
                .collect()),
            Listing::Git { workspace, git_ref } => {
                let mut args = vec!["ls-tree", "--name-only", "-r", "-z", git_ref.as_str()];
                if !self.prefix.is_empty() {
                    args.push(self.prefix.as_str());
                }
                let command = format!("git {}", args.join(" "));
                info!(%command, workspace = %workspace.display(), "Listing tracked files");

                let output = Command::new("git")
                    .args(&args)
                    .current_dir(workspace)
                    .output()
                    .map_err(|source| PathSourceError::CommandUnavailable {
                        command: command.clone(),
                        source,
                    })?;

                if !output.status.success() {
                    return Err(PathSourceError::CommandFailed {
                        command,
                        status: output.status.to_string(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    });
                }
                let text = String::from_utf8(output.stdout)?;
                Ok(parse_nul_listing(&text)
                    .into_iter()
                    .map(str::to_string)
                    .collect())
            }
        }
    }
}

impl PathSource for ListingSource {
    fn describe(&self) -> String {
        match &self.listing {
            Listing::Git { git_ref, .. } => format!("git ls-tree {} {}", git_ref, self.prefix),
            Listing::Text(_) => format!("listing under {:?}", self.prefix),
        }
    }

    fn build_tree(&self) -> Result<Node, ApiError> {
        let paths = self.relative_paths()?;
        let tree = TrieBuilder::new(self.root_name())
            .with_extension(self.extension.clone())
            .build(&paths)?;
        Ok(tree)
    }

    fn flat_paths(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.relative_paths()?)
    }
}

/// Split listing text into lines, dropping the empty artifact after the final newline
pub fn parse_listing(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Split NUL-terminated listing output into entries
pub fn parse_nul_listing(text: &str) -> Vec<&str> {
    text.split('\0').filter(|entry| !entry.is_empty()).collect()
}

fn normalize_prefix(prefix: &str) -> String {
    let normalized = path::normalize_path_string(prefix);
    normalized.trim_matches('/').to_string()
}
