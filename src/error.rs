//! Error types for manifest construction and the tooling around it.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining the raw set of paths to describe
#[derive(Debug, Error)]
pub enum PathSourceError {
    #[error("Root path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Listing command `{command}` could not be started: {source}")]
    CommandUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Listing command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Listing output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Listed path {path:?} is outside prefix {prefix:?}")]
    OutsidePrefix { path: String, prefix: String },

    #[error("Path source I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures while building the nested tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Structural conflict in {path:?}: segment {segment:?} is a file but is used as a directory")]
    StructuralConflict { path: String, segment: String },

    #[error("Failed to read {path:?} during directory walk: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    pub(crate) fn walk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Walk {
            path: path.into(),
            source,
        }
    }
}

/// Failures while rendering or writing manifest artifacts
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Failed to encode manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the release downloader
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("No asset named {asset:?} in latest release of {repository}")]
    AssetNotFound { repository: String, asset: String },

    #[error("Home directory could not be determined")]
    NoHomeDirectory,

    #[error("Failed to install {path:?}: {source}")]
    Install {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for DownloadError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            DownloadError::Status {
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
                status: status.as_u16(),
            }
        } else if error.is_timeout() {
            DownloadError::Http(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            DownloadError::Http(format!("Connection error: {}", error))
        } else {
            DownloadError::Http(error.to_string())
        }
    }
}

/// Top-level error surfaced to the invoker
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    PathSource(#[from] PathSourceError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
