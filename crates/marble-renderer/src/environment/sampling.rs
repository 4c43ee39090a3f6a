//! Low-discrepancy sampling and cube/equirect direction helpers.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::assets::RawPanorama;

/// Bilinear lookup of an equirectangular panorama along `dir`.
pub(crate) fn sample_equirect(image: &RawPanorama, dir: Vec3) -> Vec3 {
    let d = dir.normalize();
    let theta = d.y.clamp(-1.0, 1.0).acos();
    let phi = d.z.atan2(d.x);
    let u = (phi + PI) / TAU;
    let v = theta / PI;
    let x = u * (image.width as f32 - 1.0);
    let y = v * (image.height as f32 - 1.0);
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;

    let ix0 = x0.rem_euclid(image.width as f32) as u32;
    let ix1 = (x0 + 1.0).rem_euclid(image.width as f32) as u32;
    let iy0 = y0.clamp(0.0, (image.height - 1) as f32) as u32;
    let iy1 = (y0 + 1.0).clamp(0.0, (image.height - 1) as f32) as u32;

    let c0 = image.pixel(ix0, iy0).lerp(image.pixel(ix1, iy0), tx);
    let c1 = image.pixel(ix0, iy1).lerp(image.pixel(ix1, iy1), tx);
    c0.lerp(c1, ty)
}

/// Direction through texel (`x`, `y`) of cube `face` (+X, -X, +Y, -Y, +Z, -Z).
pub(crate) fn cubemap_direction(face: usize, x: u32, y: u32, size: u32) -> Vec3 {
    let a = (2.0 * (x as f32 + 0.5) / size as f32) - 1.0;
    let b = (2.0 * (y as f32 + 0.5) / size as f32) - 1.0;
    match face {
        0 => Vec3::new(1.0, -b, -a),
        1 => Vec3::new(-1.0, -b, a),
        2 => Vec3::new(a, 1.0, b),
        3 => Vec3::new(a, -1.0, -b),
        4 => Vec3::new(a, -b, 1.0),
        _ => Vec3::new(-a, -b, -1.0),
    }
    .normalize()
}

pub(crate) fn cosine_sample_hemisphere(normal: Vec3, xi: Vec2) -> Vec3 {
    let r = xi.x.sqrt();
    let theta = TAU * xi.y;
    let local = Vec3::new(r * theta.cos(), r * theta.sin(), (1.0 - xi.x).sqrt());
    tangent_to_world(normal, local)
}

pub(crate) fn importance_sample_ggx(normal: Vec3, xi: Vec2, roughness: f32) -> Vec3 {
    let a = roughness.max(0.001);
    let phi = TAU * xi.x;
    let cos_theta = ((1.0 - xi.y) / (1.0 + (a * a - 1.0) * xi.y)).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let h = Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta);
    tangent_to_world(normal, h)
}

fn tangent_to_world(normal: Vec3, v: Vec3) -> Vec3 {
    let up = if normal.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
    let tangent = normal.cross(up).normalize();
    let bitangent = normal.cross(tangent);
    tangent * v.x + bitangent * v.y + normal * v.z
}

pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

pub(crate) fn hammersley(i: u32, n: u32) -> Vec2 {
    Vec2::new(i as f32 / n as f32, radical_inverse_vdc(i))
}

fn radical_inverse_vdc(bits: u32) -> f32 {
    bits.reverse_bits() as f32 * 2.328_306_4e-10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_panorama(value: Vec3) -> RawPanorama {
        RawPanorama {
            source: "mem://const".into(),
            width: 8,
            height: 4,
            pixels: vec![value; 32],
        }
    }

    #[test]
    fn radical_inverse_first_terms() {
        assert_eq!(radical_inverse_vdc(0), 0.0);
        assert!((radical_inverse_vdc(1) - 0.5).abs() < 1e-7);
        assert!((radical_inverse_vdc(2) - 0.25).abs() < 1e-7);
        assert!((radical_inverse_vdc(3) - 0.75).abs() < 1e-7);
    }

    #[test]
    fn hammersley_first_point_is_origin() {
        assert_eq!(hammersley(0, 16), Vec2::ZERO);
        assert!((hammersley(8, 16).x - 0.5).abs() < 1e-7);
    }

    #[test]
    fn cube_face_centers_point_along_axes() {
        let axes = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];
        for (face, axis) in axes.iter().enumerate() {
            // Even size has no exact center texel; use size 1.
            let d = cubemap_direction(face, 0, 0, 1);
            assert!(d.abs_diff_eq(*axis, 1e-6), "face {face}: {d:?}");
        }
    }

    #[test]
    fn hemisphere_samples_stay_above_surface() {
        let n = Vec3::new(0.3, 0.8, -0.2).normalize();
        for i in 0..32 {
            let xi = hammersley(i, 32);
            assert!(cosine_sample_hemisphere(n, xi).dot(n) >= -1e-5);
            assert!(importance_sample_ggx(n, xi, 0.5).dot(n) >= -1e-5);
        }
    }

    #[test]
    fn smooth_ggx_sample_is_the_normal() {
        let n = Vec3::Y;
        let h = importance_sample_ggx(n, Vec2::new(0.3, 0.0), 0.0);
        assert!(h.abs_diff_eq(n, 1e-5));
    }

    #[test]
    fn equirect_of_constant_image_is_constant() {
        let pano = constant_panorama(Vec3::new(0.25, 0.5, 1.0));
        for dir in [Vec3::X, Vec3::Y, -Vec3::Y, Vec3::new(-1.0, 0.2, -0.4)] {
            let c = sample_equirect(&pano, dir);
            assert!(c.abs_diff_eq(Vec3::new(0.25, 0.5, 1.0), 1e-6));
        }
    }

    #[test]
    fn equirect_top_row_is_up() {
        let mut pano = constant_panorama(Vec3::ZERO);
        for x in 0..8 {
            pano.pixels[x] = Vec3::ONE;
        }
        assert!(sample_equirect(&pano, Vec3::Y).abs_diff_eq(Vec3::ONE, 1e-6));
        assert!(sample_equirect(&pano, -Vec3::Y).abs_diff_eq(Vec3::ZERO, 1e-6));
    }
}
