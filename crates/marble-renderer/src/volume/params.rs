use std::num::NonZeroU32;

use marble_common::ConfigError;
use marble_config::colors::parse_rgb_f32;
use marble_config::schema::RenderParams;

/// Validated raymarch parameters in shader-ready form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchParams {
    pub iterations: NonZeroU32,
    pub roughness: f32,
    pub depth: f32,
    pub smoothing: f32,
    pub displacement: f32,
    pub speed: f32,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
}

impl MarchParams {
    /// Convert config values, rejecting a zero trip count and malformed
    /// colors before any shader is composed.
    pub fn from_config(params: &RenderParams) -> Result<Self, ConfigError> {
        let iterations = NonZeroU32::new(params.iterations).ok_or_else(|| {
            ConfigError::ValidationError("render.iterations must be at least 1".into())
        })?;
        let color_a = parse_rgb_f32(&params.color_a)
            .map_err(|e| ConfigError::ValidationError(format!("render.color_a: {e}")))?;
        let color_b = parse_rgb_f32(&params.color_b)
            .map_err(|e| ConfigError::ValidationError(format!("render.color_b: {e}")))?;

        Ok(Self {
            iterations,
            roughness: params.roughness as f32,
            depth: params.depth as f32,
            smoothing: params.smoothing as f32,
            displacement: params.displacement as f32,
            speed: params.speed as f32,
            color_a,
            color_b,
        })
    }

    /// `1 / iterations`: the occupancy weight of one step.
    pub fn per_step(&self) -> f32 {
        1.0 / self.iterations.get() as f32
    }
}
