//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global file, then the
//! workspace `filelist.toml`, then `FILELIST_*` environment variables.

use crate::download::DownloadConfig;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::manifest::{Layout, DEFAULT_INDENT};
use crate::tree::builder::DEFAULT_FILE_EXTENSION;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_NAME};

pub const DEFAULT_FETCH_URL: &str =
    "https://raw.githubusercontent.com/Sleitnick/AeroGameFramework/master/";
pub const DEFAULT_PRETTY_NAME: &str = "filelist.json";
pub const DEFAULT_COMPACT_NAME: &str = "filelist.min.json";
pub const DEFAULT_PREFIX: &str = "src";
pub const DEFAULT_GIT_REF: &str = "master";

const MAX_INDENT: usize = 16;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilelistConfig {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Manifest output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Fetch-URL prefix every listed path resolves against
    #[serde(default = "default_url")]
    pub url: String,

    /// Directory receiving both artifacts, relative to the workspace
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_pretty_name")]
    pub pretty_name: String,

    #[serde(default = "default_compact_name")]
    pub compact_name: String,

    /// Indentation width of the pretty artifact
    #[serde(default = "default_indent")]
    pub indent: usize,

    #[serde(default)]
    pub layout: Layout,
}

fn default_url() -> String {
    DEFAULT_FETCH_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pretty_name() -> String {
    DEFAULT_PRETTY_NAME.to_string()
}

fn default_compact_name() -> String {
    DEFAULT_COMPACT_NAME.to_string()
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            output_dir: default_output_dir(),
            pretty_name: default_pretty_name(),
            compact_name: default_compact_name(),
            indent: default_indent(),
            layout: Layout::default(),
        }
    }
}

/// Which path source to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Tracked files from `git ls-tree`
    #[default]
    Git,
    /// Live directory walk
    Walk,
}

impl FromStr for SourceKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(SourceKind::Git),
            "walk" => Ok(SourceKind::Walk),
            other => Err(ApiError::ConfigError(format!(
                "Invalid source: {} (must be 'git' or 'walk')",
                other
            ))),
        }
    }
}

/// Path source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Repository subtree to describe; also names the tree root
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Revision listed by the git source
    #[serde(default = "default_git_ref")]
    pub git_ref: String,

    /// Extension marking listing leaves as files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Walk root (default: `<workspace>/<prefix>`)
    #[serde(default)]
    pub root: Option<PathBuf>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_git_ref() -> String {
    DEFAULT_GIT_REF.to_string()
}

fn default_extension() -> String {
    DEFAULT_FILE_EXTENSION.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            prefix: default_prefix(),
            git_ref: default_git_ref(),
            extension: default_extension(),
            root: None,
        }
    }
}

impl SourceConfig {
    /// Walk root resolved against the workspace
    pub fn resolve_root(&self, workspace_root: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => workspace_root.join(root),
            None => workspace_root.join(&self.prefix),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Manifest(String),
    Source(String),
    Download(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Manifest(msg) => write!(f, "Manifest: {}", msg),
            ValidationError::Source(msg) => write!(f, "Source: {}", msg),
            ValidationError::Download(msg) => write!(f, "Download: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FilelistConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.manifest.url.trim().is_empty() {
            errors.push(ValidationError::Manifest("url cannot be empty".to_string()));
        }
        if self.manifest.indent > MAX_INDENT {
            errors.push(ValidationError::Manifest(format!(
                "indent {} exceeds {}",
                self.manifest.indent, MAX_INDENT
            )));
        }
        if self.manifest.pretty_name.is_empty() || self.manifest.compact_name.is_empty() {
            errors.push(ValidationError::Manifest(
                "artifact names cannot be empty".to_string(),
            ));
        } else if self.manifest.pretty_name == self.manifest.compact_name {
            errors.push(ValidationError::Manifest(
                "pretty and compact artifacts must have different names".to_string(),
            ));
        }

        if !self.source.extension.starts_with('.') || self.source.extension.len() < 2 {
            errors.push(ValidationError::Source(format!(
                "extension {:?} must start with '.'",
                self.source.extension
            )));
        }

        if self.download.repository.split('/').filter(|s| !s.is_empty()).count() != 2 {
            errors.push(ValidationError::Download(format!(
                "repository {:?} must be 'owner/name'",
                self.download.repository
            )));
        }
        if self.download.asset_name.is_empty() {
            errors.push(ValidationError::Download(
                "asset_name cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
