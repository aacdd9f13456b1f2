//! Release downloader
//!
//! Fetches the latest release of a hosted tool, picks the platform asset by exact
//! name, and installs it as an executable under the user's home directory.
//! Independent of manifest construction.

use crate::error::DownloadError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REPOSITORY: &str = "Kampfkarren/selene";
pub const DEFAULT_ASSET_NAME: &str = "selene-linux";
const DEFAULT_BINARY_NAME: &str = "selene";
const USER_AGENT: &str = concat!("filelist/", env!("CARGO_PKG_VERSION"));

/// Downloader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// `owner/name` of the hosted repository
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Exact asset name to install
    #[serde(default = "default_asset_name")]
    pub asset_name: String,

    /// Releases API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Install location (default: ~/.cargo/bin/selene)
    #[serde(default)]
    pub install_path: Option<PathBuf>,
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

fn default_asset_name() -> String {
    DEFAULT_ASSET_NAME.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            asset_name: default_asset_name(),
            api_base: default_api_base(),
            install_path: None,
        }
    }
}

impl DownloadConfig {
    /// Configured install path, or `~/.cargo/bin/selene`
    pub fn resolve_install_path(&self) -> Result<PathBuf, DownloadError> {
        match &self.install_path {
            Some(path) => Ok(path.clone()),
            None => default_install_path(),
        }
    }
}

/// Release metadata as returned by the releases API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Access to a hosted releases API
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    async fn latest_release(&self, repository: &str) -> Result<Release, DownloadError>;

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// GitHub releases API client
pub struct GitHubReleases {
    client: Client,
    api_base: String,
}

impl GitHubReleases {
    pub fn new(api_base: impl Into<String>) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DownloadError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReleaseApi for GitHubReleases {
    async fn latest_release(&self, repository: &str) -> Result<Release, DownloadError> {
        let url = format!("{}/repos/{}/releases/latest", self.api_base, repository);
        debug!(%url, "Requesting latest release");
        let release = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json::<Release>()
            .await?;
        Ok(release)
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        debug!(%url, "Downloading asset");
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// Asset with exactly this name, if the release carries one
pub fn select_asset<'a>(release: &'a Release, name: &str) -> Option<&'a ReleaseAsset> {
    release.assets.iter().find(|asset| asset.name == name)
}

/// `~/.cargo/bin/selene`
pub fn default_install_path() -> Result<PathBuf, DownloadError> {
    let dirs = directories::BaseDirs::new().ok_or(DownloadError::NoHomeDirectory)?;
    Ok(dirs
        .home_dir()
        .join(".cargo")
        .join("bin")
        .join(DEFAULT_BINARY_NAME))
}

/// Write `bytes` to `path` and mark it executable
pub fn install_binary(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let install_error = |source| DownloadError::Install {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(install_error)?;
    }
    std::fs::write(path, bytes).map_err(install_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(install_error)?;
    }

    Ok(())
}

/// Latest-release installer
pub struct Downloader<A> {
    api: A,
    repository: String,
    asset_name: String,
    install_path: PathBuf,
}

impl<A: ReleaseApi> Downloader<A> {
    pub fn new(
        api: A,
        repository: impl Into<String>,
        asset_name: impl Into<String>,
        install_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            repository: repository.into(),
            asset_name: asset_name.into(),
            install_path: install_path.into(),
        }
    }

    /// Download and install; returns the installed path
    #[instrument(skip(self), fields(repository = %self.repository, asset = %self.asset_name))]
    pub async fn run(&self) -> Result<PathBuf, DownloadError> {
        info!("Fetching latest release");
        let release = self.api.latest_release(&self.repository).await?;

        let asset = select_asset(&release, &self.asset_name).ok_or_else(|| {
            DownloadError::AssetNotFound {
                repository: self.repository.clone(),
                asset: self.asset_name.clone(),
            }
        })?;
        debug!(tag = ?release.tag_name, url = %asset.browser_download_url, "Selected asset");

        let bytes = self.api.fetch_asset(&asset.browser_download_url).await?;
        install_binary(&self.install_path, &bytes)?;

        info!(
            path = %self.install_path.display(),
            size = bytes.len(),
            "Release asset installed"
        );
        Ok(self.install_path.clone())
    }
}
