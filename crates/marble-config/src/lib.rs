//! Marble configuration system.
//!
//! Provides TOML-based configuration with live reload and full
//! validation. All config sections use defaults so partial configs work
//! out of the box; an empty file reproduces the stock marble.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use marble_config::load_config;
//!
//! let (path, config) = load_config(None).expect("failed to load config");
//! println!("{}: {} iterations", path.display(), config.render.iterations);
//! ```

pub mod colors;
pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{MarbleConfig, CONFIG_SCHEMA_VERSION};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};

use marble_common::ConfigError;

/// Load config from `path`, or the platform default path, and validate it.
///
/// Creates a commented default `config.toml` if none exists. Returns the
/// path that was read alongside the config.
pub fn load_config(path: Option<&Path>) -> Result<(PathBuf, MarbleConfig), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => toml_loader::default_config_path()?,
    };
    let config = toml_loader::load_or_create(&path)?;
    validation::validate(&config)?;
    Ok((path, config))
}
