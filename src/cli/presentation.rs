//! CLI presentation: human-readable command summaries.

use crate::manifest::{Manifest, ManifestPaths, WrittenManifest};
use owo_colors::OwoColorize;
use std::path::Path;

/// Summary printed after `build`
pub fn format_build_summary(manifest: &Manifest, written: &WrittenManifest) -> String {
    let detail = match &manifest.paths {
        ManifestPaths::Tree(root) => format!(
            "{} files in {} nodes under {:?}",
            root.file_count(),
            root.count(),
            root.name()
        ),
        ManifestPaths::Flat(paths) => format!("{} paths", paths.len()),
    };

    format!(
        "{}\n  {}\n  {} ({} bytes)\n  {} ({} bytes)",
        "File list built".green().bold(),
        detail,
        written.pretty_path.display(),
        written.pretty_bytes,
        written.compact_path.display(),
        written.compact_bytes,
    )
}

/// Summary printed after `download`
pub fn format_download_summary(installed: &Path) -> String {
    format!("{} {}", "Downloaded".green().bold(), installed.display())
}
