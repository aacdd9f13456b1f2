//! Environment variable source: FILELIST_ prefix with __ separator for nested keys
//! (e.g. FILELIST_MANIFEST__URL).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("FILELIST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    ))
}
