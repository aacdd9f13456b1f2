//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Commands, SourceArgs};
use crate::cli::presentation::{format_build_summary, format_download_summary};
use crate::config::{ConfigLoader, FilelistConfig};
use crate::download::{Downloader, GitHubReleases};
use crate::error::ApiError;
use crate::manifest::{Manifest, ManifestWriter};
use crate::source;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: workspace root and merged configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: FilelistConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Create run context from an already-loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: FilelistConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &FilelistConfig {
        &self.config
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Build { source, output_dir } => self.handle_build(source, output_dir),
            Commands::Print { source, compact } => self.handle_print(source, *compact),
            Commands::Download {
                repository,
                asset,
                install_path,
            } => self.handle_download(repository, asset, install_path),
        }
    }

    fn handle_build(
        &self,
        args: &SourceArgs,
        output_dir: &Option<PathBuf>,
    ) -> Result<String, ApiError> {
        let mut config = self.apply_source_args(args)?;
        if let Some(dir) = output_dir {
            config.manifest.output_dir = dir.clone();
        }
        validate(&config)?;

        info!("Building file list");
        let manifest = self.build_manifest(&config)?;

        let output_dir = self.workspace_root.join(&config.manifest.output_dir);
        let writer = ManifestWriter::new(
            output_dir,
            config.manifest.pretty_name.clone(),
            config.manifest.compact_name.clone(),
        )
        .with_indent(config.manifest.indent);
        let written = writer.write(&manifest)?;

        info!(entries = manifest.entry_count(), "File list built");
        Ok(format_build_summary(&manifest, &written))
    }

    fn handle_print(&self, args: &SourceArgs, compact: bool) -> Result<String, ApiError> {
        let config = self.apply_source_args(args)?;
        validate(&config)?;

        let manifest = self.build_manifest(&config)?;
        let bytes = if compact {
            manifest.render_compact()?
        } else {
            manifest.render_pretty(config.manifest.indent)?
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn handle_download(
        &self,
        repository: &Option<String>,
        asset: &Option<String>,
        install_path: &Option<PathBuf>,
    ) -> Result<String, ApiError> {
        let mut config = self.config.clone();
        if let Some(repository) = repository {
            config.download.repository = repository.clone();
        }
        if let Some(asset) = asset {
            config.download.asset_name = asset.clone();
        }
        if let Some(path) = install_path {
            config.download.install_path = Some(path.clone());
        }
        validate(&config)?;

        let download = config.download;
        let target = download.resolve_install_path()?;
        let api = GitHubReleases::new(download.api_base.clone())?;
        let downloader = Downloader::new(api, download.repository, download.asset_name, target);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;
        let installed = runtime.block_on(downloader.run())?;

        Ok(format_download_summary(&installed))
    }

    fn build_manifest(&self, config: &FilelistConfig) -> Result<Manifest, ApiError> {
        let path_source = source::from_config(config, &self.workspace_root);
        Manifest::from_source(
            path_source.as_ref(),
            config.manifest.layout,
            config.manifest.url.clone(),
        )
    }

    /// Configuration with CLI overrides applied (CLI wins).
    fn apply_source_args(&self, args: &SourceArgs) -> Result<FilelistConfig, ApiError> {
        let mut config = self.config.clone();
        if let Some(ref kind) = args.source {
            config.source.kind = kind.parse()?;
        }
        if let Some(ref layout) = args.layout {
            config.manifest.layout = layout.parse()?;
        }
        if let Some(ref prefix) = args.prefix {
            config.source.prefix = prefix.clone();
        }
        if let Some(ref git_ref) = args.git_ref {
            config.source.git_ref = git_ref.clone();
        }
        if let Some(ref root) = args.root {
            config.source.root = Some(root.clone());
        }
        if let Some(ref extension) = args.extension {
            config.source.extension = extension.clone();
        }
        if let Some(ref url) = args.url {
            config.manifest.url = url.clone();
        }
        Ok(config)
    }
}

fn validate(config: &FilelistConfig) -> Result<(), ApiError> {
    config.validate().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ApiError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            messages.join("\n")
        ))
    })
}
