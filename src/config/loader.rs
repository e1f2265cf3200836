// Configuration loader
//
// Reads the JSON configuration file. A missing or malformed file is fatal
// to the invoking process: without configuration no client can be
// constructed, so the error is propagated out of main rather than wrapped
// in the operation envelope.

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use std::path::Path;

use super::settings::ClientConfig;

/// Load client configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Json))
        .build()
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid config file {}", path.display()))
}
