//! Core TOML config loading: read from a path, creating it if missing.

use crate::schema::MarbleConfig;
use marble_common::ConfigError;
use std::path::Path;
use tracing::{debug, info};

use super::paths::create_default_config;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Validation is left to the caller.
pub fn load_from_path(path: &Path) -> Result<MarbleConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        }
    })?;

    let config: MarbleConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    debug!(path = %path.display(), "parsed config file");
    Ok(config)
}

/// Load config from `path`, writing the commented default template there
/// first if the file does not exist.
pub fn load_or_create(path: &Path) -> Result<MarbleConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(MarbleConfig::default())
        }
        Err(e) => Err(e),
    }
}
