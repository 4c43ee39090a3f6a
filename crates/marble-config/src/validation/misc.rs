//! Validation for the assets, window and camera sections.

use crate::schema::MarbleConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f64};

pub(crate) fn validate_assets(errors: &mut Vec<String>, config: &MarbleConfig) {
    let a = &config.assets;
    validate_non_empty(errors, "assets.height_map", &a.height_map);
    validate_non_empty(errors, "assets.displacement_map", &a.displacement_map);
    validate_non_empty(errors, "assets.environment", &a.environment);
    if a.request_timeout_secs == 0 || a.request_timeout_secs > 600 {
        errors.push(format!(
            "assets.request_timeout_secs = {} is out of range [1, 600]",
            a.request_timeout_secs
        ));
    }
}

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &MarbleConfig) {
    let w = &config.window;
    validate_range(errors, "window.width", w.width, 16, 4096);
    validate_range(errors, "window.height", w.height, 16, 4096);
    // An unusable mount falls back to the window at runtime; only an
    // empty string is rejected here.
    validate_non_empty(errors, "window.mount", &w.mount);
}

pub(crate) fn validate_camera(errors: &mut Vec<String>, config: &MarbleConfig) {
    let c = &config.camera;
    validate_range_f64(errors, "camera.fov_degrees", c.fov_degrees, 1.0, 179.0);
    validate_range_f64(errors, "camera.near", c.near, 1e-4, 100.0);
    validate_range_f64(errors, "camera.far", c.far, 1.0, 1.0e6);
    validate_range_f64(errors, "camera.damping_factor", c.damping_factor, 0.0, 1.0);
    validate_range_f64(
        errors,
        "camera.auto_rotate_speed",
        c.auto_rotate_speed,
        -100.0,
        100.0,
    );
    validate_range_f64(errors, "camera.rotate_speed", c.rotate_speed, 0.0, 100.0);

    if c.far <= c.near {
        errors.push(format!(
            "camera.far = {} must be greater than camera.near = {}",
            c.far, c.near
        ));
    }
    if !c.distance.is_finite() || c.distance <= c.near {
        errors.push(format!(
            "camera.distance = {} must be greater than camera.near = {}",
            c.distance, c.near
        ));
    }
}
