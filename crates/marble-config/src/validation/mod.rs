//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod misc;
mod render;


use crate::schema::MarbleConfig;
use marble_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MarbleConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    render::validate_render(&mut errors, config);
    misc::validate_assets(&mut errors, config);
    misc::validate_window(&mut errors, config);
    misc::validate_camera(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
