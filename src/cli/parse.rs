//! CLI parse: clap types for Filelist. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filelist CLI - fetchable manifests of source-asset trees
#[derive(Parser, Debug)]
#[command(name = "filelist")]
#[command(about = "Build file-tree manifests for content-delivery fetching")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (repository checkout)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Path source and layout overrides shared by `build` and `print`
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path source: git (tracked files) or walk (live directory)
    #[arg(long, value_parser = ["git", "walk"])]
    pub source: Option<String>,

    /// Manifest layout: tree (nested nodes) or flat (length-ordered paths)
    #[arg(long, value_parser = ["tree", "flat"])]
    pub layout: Option<String>,

    /// Repository subtree to list; also names the tree root
    #[arg(long)]
    pub prefix: Option<String>,

    /// Revision listed by the git source
    #[arg(long)]
    pub git_ref: Option<String>,

    /// Walk root for the walk source
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Extension marking listing leaves as files
    #[arg(long)]
    pub extension: Option<String>,

    /// Fetch-URL prefix written into the manifest
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the manifest and write the pretty and compact artifacts
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory receiving both artifacts
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Render the manifest to stdout without writing files
    Print {
        #[command(flatten)]
        source: SourceArgs,

        /// Single-line rendering
        #[arg(long)]
        compact: bool,
    },
    /// Download the latest release binary of the linter tool
    Download {
        /// `owner/name` of the hosted repository
        #[arg(long)]
        repository: Option<String>,

        /// Exact release asset name
        #[arg(long)]
        asset: Option<String>,

        /// Install location
        #[arg(long)]
        install_path: Option<PathBuf>,
    },
}
