use std::f32::consts::{FRAC_1_PI, TAU};

use glam::{Vec2, Vec3};

use super::field::FieldSampler;
use super::params::MarchParams;

const SCROLL_FLIP: Vec2 = Vec2::new(1.0, -1.0);

/// Longitude/latitude UV of a unit direction.
pub fn equirect_uv(dir: Vec3) -> Vec2 {
    let u = dir.z.atan2(dir.x) * (1.0 / TAU) + 0.5;
    let v = dir.y.clamp(-1.0, 1.0).asin() * FRAC_1_PI + 0.5;
    Vec2::new(u, v)
}

/// Hermite smoothstep; a hard step at `edge0` when the band is empty.
pub fn soft_threshold(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Offset `p` by two counter-scrolling displacement samples.
pub fn displace_point(p: Vec3, strength: f32, time: f32, displacement: &impl FieldSampler) -> Vec3 {
    let uv = equirect_uv(p.normalize());
    let scroll = Vec2::new(time, 0.0);
    let a = rgb(displacement.sample((uv + scroll).into())) - Vec3::splat(0.5);
    let b = rgb(displacement.sample((uv * SCROLL_FLIP - scroll).into())) - Vec3::splat(0.5);
    p + strength * (a + b)
}

/// Accumulated occupancy along the ray, before color mixing.
pub fn march_occupancy(
    ray_origin: Vec3,
    ray_dir: Vec3,
    params: &MarchParams,
    time: f32,
    height: &impl FieldSampler,
    displacement: &impl FieldSampler,
) -> f32 {
    let per_step = params.per_step();
    let delta_ray = ray_dir * (per_step * params.depth);
    let mut p = ray_origin;
    let mut total = 0.0f32;

    for i in 0..params.iterations.get() {
        let displaced = displace_point(p, params.displacement, time, displacement);
        let uv = equirect_uv(displaced.normalize());
        let h = height.sample(uv.into())[0];
        let cutoff = 1.0 - i as f32 * per_step;
        total += soft_threshold(cutoff, cutoff + params.smoothing, h) * per_step;
        p += delta_ray;
    }
    total
}

/// Marble color for one ray: `mix(color_a, color_b, occupancy)`.
pub fn march_volume(
    ray_origin: Vec3,
    ray_dir: Vec3,
    params: &MarchParams,
    time: f32,
    height: &impl FieldSampler,
    displacement: &impl FieldSampler,
) -> [f32; 3] {
    let total = march_occupancy(ray_origin, ray_dir, params, time, height, displacement);
    Vec3::from(params.color_a)
        .lerp(Vec3::from(params.color_b), total)
        .into()
}

fn rgb(texel: [f32; 4]) -> Vec3 {
    Vec3::new(texel[0], texel[1], texel[2])
}
