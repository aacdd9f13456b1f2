//! Merge rules: defaults applied beneath every other source.

use crate::download::{DEFAULT_API_BASE, DEFAULT_ASSET_NAME, DEFAULT_REPOSITORY};
use crate::tree::builder::DEFAULT_FILE_EXTENSION;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use super::super::{
    DEFAULT_COMPACT_NAME, DEFAULT_FETCH_URL, DEFAULT_GIT_REF, DEFAULT_PREFIX, DEFAULT_PRETTY_NAME,
};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("manifest.url", DEFAULT_FETCH_URL)?
        .set_default("manifest.output_dir", ".")?
        .set_default("manifest.pretty_name", DEFAULT_PRETTY_NAME)?
        .set_default("manifest.compact_name", DEFAULT_COMPACT_NAME)?
        .set_default("source.prefix", DEFAULT_PREFIX)?
        .set_default("source.git_ref", DEFAULT_GIT_REF)?
        .set_default("source.extension", DEFAULT_FILE_EXTENSION)?
        .set_default("download.repository", DEFAULT_REPOSITORY)?
        .set_default("download.asset_name", DEFAULT_ASSET_NAME)?
        .set_default("download.api_base", DEFAULT_API_BASE)
}
