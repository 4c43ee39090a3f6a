//! Validation for the `[render]` section.

use crate::colors::validate_color;
use crate::schema::MarbleConfig;

use super::helpers::{validate_range, validate_range_f64};

/// Upper bound on raymarch steps; each step costs three texture fetches.
pub const MAX_ITERATIONS: u32 = 512;

pub(crate) fn validate_render(errors: &mut Vec<String>, config: &MarbleConfig) {
    let r = &config.render;

    validate_range(
        errors,
        "render.iterations",
        r.iterations,
        1,
        MAX_ITERATIONS,
    );
    validate_range_f64(errors, "render.roughness", r.roughness, 0.0, 1.0);
    validate_range_f64(errors, "render.depth", r.depth, 0.0, 4.0);
    validate_range_f64(errors, "render.smoothing", r.smoothing, 0.0, 1.0);
    validate_range_f64(errors, "render.displacement", r.displacement, 0.0, 1.0);
    validate_range_f64(errors, "render.speed", r.speed, 0.0, 10.0);

    for (name, value) in [("render.color_a", &r.color_a), ("render.color_b", &r.color_b)] {
        if !validate_color(value) {
            errors.push(format!("{name} = {value:?} is not a valid color"));
        }
    }
}
