//! The marble injection: raymarch uniforms, maps, and base-color override.

use marble_common::ShaderAugmentationError;

use super::augment::{augment, ShaderConst, ShaderInjection, ShaderProgram, Varying};
use super::template::{base_uniforms, STANDARD_PBR};
use super::uniforms::{UniformBlock, UniformValue};
use crate::assets::TextureRole;
use crate::volume::MarchParams;

/// Raymarch functions injected before the fragment entry point.
pub const MARBLE_MARCH: &str = include_str!("../shaders/marble_march.wgsl");

/// Constant carrying the baked raymarch trip count.
pub const ITERATIONS_CONST: &str = "MARCH_ITERATIONS";

const BASE_COLOR_BODY: &str = "\
let ray_dir = normalize(frag.view_ray);
let ray_origin = frag.local_position;
let rgb = march_volume(ray_origin, ray_dir);
diffuse_color = vec4<f32>(rgb, 1.0);";

/// Uniform values contributed by the marble; `roughness` overrides the
/// template's own.
pub fn marble_uniforms(params: &MarchParams, time: f32) -> UniformBlock {
    UniformBlock::new()
        .with("roughness", UniformValue::F32(params.roughness))
        .with("color_a", UniformValue::Vec3(params.color_a))
        .with("color_b", UniformValue::Vec3(params.color_b))
        .with("depth", UniformValue::F32(params.depth))
        .with("smoothing", UniformValue::F32(params.smoothing))
        .with("displacement", UniformValue::F32(params.displacement))
        .with("time", UniformValue::F32(time))
}

pub fn marble_injection(params: &MarchParams) -> ShaderInjection {
    ShaderInjection {
        uniforms: marble_uniforms(params, 0.0),
        textures: vec![
            TextureRole::HeightMap.binding_name().to_string(),
            TextureRole::DisplacementMap.binding_name().to_string(),
        ],
        constants: vec![(
            ITERATIONS_CONST.to_string(),
            ShaderConst::U32(params.iterations.get()),
        )],
        varyings: vec![
            Varying::new("local_position", "vec3<f32>", "v_in.position"),
            // Camera to vertex, in object space.
            Varying::new(
                "view_ray",
                "vec3<f32>",
                "v_in.position - camera.camera_local.xyz",
            ),
        ],
        fragment_code: MARBLE_MARCH.to_string(),
        base_color: Some(BASE_COLOR_BODY.to_string()),
    }
}

/// Compose the standard template with the marble injection.
pub fn marble_program(params: &MarchParams) -> Result<ShaderProgram, ShaderAugmentationError> {
    augment(STANDARD_PBR, &base_uniforms(), &marble_injection(params))
}
