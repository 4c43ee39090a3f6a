//! Marble shading parameters.

use serde::{Deserialize, Serialize};

/// User-facing render parameters for the marble material.
///
/// `iterations` is the raymarch trip count and is baked into the shader
/// program, so changing it means recompiling rather than a uniform write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Surface roughness of the physically-based layer (0.0-1.0).
    pub roughness: f64,
    /// Raymarch steps per pixel (must be at least 1).
    pub iterations: u32,
    /// How far into the sphere the ray travels, in sphere radii.
    pub depth: f64,
    /// Width of the soft occupancy band.
    pub smoothing: f64,
    /// Strength of the scrolling displacement.
    pub displacement: f64,
    /// Displacement scroll rate, in texture widths per second.
    pub speed: f64,
    /// Color at zero occupancy.
    #[serde(alias = "colorA")]
    pub color_a: String,
    /// Color at full occupancy.
    #[serde(alias = "colorB")]
    pub color_b: String,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            roughness: 0.1,
            iterations: 48,
            depth: 0.6,
            smoothing: 0.2,
            displacement: 0.1,
            speed: 0.05,
            color_a: "#000000".into(),
            color_b: "#00ffaa".into(),
        }
    }
}
