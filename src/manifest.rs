//! Manifest record, rendering, and the all-or-nothing artifact writer

use crate::error::{ApiError, SerializationError};
use crate::source::PathSource;
use crate::tree::Node;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Default indentation width of the pretty rendering
pub const DEFAULT_INDENT: usize = 2;

/// Shape of the `paths` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Nested node tree
    #[default]
    Tree,
    /// Length-ordered list of root-relative paths
    Flat,
}

impl FromStr for Layout {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Layout::Tree),
            "flat" => Ok(Layout::Flat),
            other => Err(ApiError::ConfigError(format!(
                "Invalid layout: {} (must be 'tree' or 'flat')",
                other
            ))),
        }
    }
}

/// The `paths` value of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestPaths {
    Flat(Vec<String>),
    Tree(Node),
}

/// Top-level output record: fetch-URL prefix plus path data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub url: String,
    pub paths: ManifestPaths,
}

impl Manifest {
    pub fn tree(url: impl Into<String>, root: Node) -> Self {
        Self {
            url: url.into(),
            paths: ManifestPaths::Tree(root),
        }
    }

    /// Flat manifest; paths are reordered shortest first
    pub fn flat(url: impl Into<String>, mut paths: Vec<String>) -> Self {
        order_by_length(&mut paths);
        Self {
            url: url.into(),
            paths: ManifestPaths::Flat(paths),
        }
    }

    /// Build a manifest from a path source in the requested layout
    #[instrument(skip(source, url), fields(path_source = %source.describe()))]
    pub fn from_source(
        source: &dyn PathSource,
        layout: Layout,
        url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let manifest = match layout {
            Layout::Tree => Self::tree(url, source.build_tree()?),
            Layout::Flat => Self::flat(url, source.flat_paths()?),
        };
        debug!(entries = manifest.entry_count(), "Manifest assembled");
        Ok(manifest)
    }

    /// Files (tree) or listed paths (flat)
    pub fn entry_count(&self) -> usize {
        match &self.paths {
            ManifestPaths::Flat(paths) => paths.len(),
            ManifestPaths::Tree(root) => root.file_count(),
        }
    }

    /// Multi-line rendering with the given indentation width
    pub fn render_pretty(&self, indent: usize) -> Result<Vec<u8>, SerializationError> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    /// Single-line rendering without whitespace
    pub fn render_compact(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Stable sort by length in characters: shorter first, ties keep discovery order
pub fn order_by_length(paths: &mut [String]) {
    paths.sort_by_key(|p| p.chars().count());
}

/// Result of a successful write
#[derive(Debug, Clone)]
pub struct WrittenManifest {
    pub pretty_path: PathBuf,
    pub compact_path: PathBuf,
    pub pretty_bytes: usize,
    pub compact_bytes: usize,
}

/// Writes the pretty and compact artifacts side by side
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    output_dir: PathBuf,
    pretty_name: String,
    compact_name: String,
    indent: usize,
}

impl ManifestWriter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        pretty_name: impl Into<String>,
        compact_name: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            pretty_name: pretty_name.into(),
            compact_name: compact_name.into(),
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Render both documents, then write them
    ///
    /// Both renderings happen before any file is touched, and each file is written
    /// to a temporary sibling and renamed into place. If the first rename succeeds
    /// and the second fails, the first is rolled back to its previous content.
    #[instrument(skip(self, manifest), fields(output_dir = %self.output_dir.display()))]
    pub fn write(&self, manifest: &Manifest) -> Result<WrittenManifest, SerializationError> {
        let pretty = manifest.render_pretty(self.indent)?;
        let compact = manifest.render_compact()?;

        fs::create_dir_all(&self.output_dir).map_err(|source| SerializationError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let pretty_path = self.output_dir.join(&self.pretty_name);
        let compact_path = self.output_dir.join(&self.compact_name);

        let pretty_tmp = write_temp(&pretty_path, &pretty)?;
        let compact_tmp = match write_temp(&compact_path, &compact) {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = fs::remove_file(&pretty_tmp);
                return Err(e);
            }
        };

        let previous_pretty = fs::read(&pretty_path).ok();
        if let Err(e) = rename(&pretty_tmp, &pretty_path) {
            let _ = fs::remove_file(&pretty_tmp);
            let _ = fs::remove_file(&compact_tmp);
            return Err(e);
        }
        if let Err(e) = rename(&compact_tmp, &compact_path) {
            let _ = fs::remove_file(&compact_tmp);
            let restored = match previous_pretty {
                Some(bytes) => fs::write(&pretty_path, bytes),
                None => fs::remove_file(&pretty_path),
            };
            if let Err(restore_err) = restored {
                warn!("Failed to roll back {}: {}", pretty_path.display(), restore_err);
            }
            return Err(e);
        }

        info!(
            pretty = %pretty_path.display(),
            compact = %compact_path.display(),
            "Manifest written"
        );
        Ok(WrittenManifest {
            pretty_path,
            compact_path,
            pretty_bytes: pretty.len(),
            compact_bytes: compact.len(),
        })
    }
}

fn write_temp(target: &Path, content: &[u8]) -> Result<PathBuf, SerializationError> {
    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(temp_name);
    fs::write(&temp_path, content).map_err(|source| SerializationError::Write {
        path: temp_path.clone(),
        source,
    })?;
    Ok(temp_path)
}

fn rename(from: &Path, to: &Path) -> Result<(), SerializationError> {
    fs::rename(from, to).map_err(|source| SerializationError::Write {
        path: to.to_path_buf(),
        source,
    })
}
