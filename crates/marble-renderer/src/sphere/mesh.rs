//! UV sphere generation.

use super::types::{SphereLod, SphereVertex};

/// Generate a unit UV sphere as a plain triangle list.
///
/// `n_lat` latitude bands by `n_lon` longitude segments, two triangles per
/// quad, counter-clockwise when seen from outside. North pole is (0, 1, 0).
pub fn generate_sphere_mesh(n_lat: u32, n_lon: u32) -> Vec<SphereVertex> {
    let n_lat = n_lat.max(2);
    let n_lon = n_lon.max(3);

    let mut vertices = Vec::with_capacity((n_lat * n_lon * 6) as usize);
    let vertex = |p: [f32; 3]| SphereVertex {
        position: p,
        normal: p,
    };

    for lat in 0..n_lat {
        for lon in 0..n_lon {
            let p00 = sphere_point(lat, lon, n_lat, n_lon);
            let p10 = sphere_point(lat + 1, lon, n_lat, n_lon);
            let p01 = sphere_point(lat, lon + 1, n_lat, n_lon);
            let p11 = sphere_point(lat + 1, lon + 1, n_lat, n_lon);

            vertices.extend([p00, p01, p10].map(vertex));
            vertices.extend([p10, p01, p11].map(vertex));
        }
    }

    vertices
}

pub fn generate_sphere_mesh_lod(lod: SphereLod) -> Vec<SphereVertex> {
    generate_sphere_mesh(lod.latitudes, lod.longitudes)
}

fn sphere_point(lat: u32, lon: u32, n_lat: u32, n_lon: u32) -> [f32; 3] {
    let theta = std::f32::consts::PI * (lat as f32) / (n_lat as f32);
    let phi = std::f32::consts::TAU * (lon as f32) / (n_lon as f32);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertex_count() {
        assert_eq!(generate_sphere_mesh(4, 8).len(), 4 * 8 * 6);
        assert_eq!(
            generate_sphere_mesh_lod(SphereLod::STANDARD).len(),
            32 * 64 * 6
        );
    }

    #[test]
    fn minimum_clamp() {
        assert_eq!(generate_sphere_mesh(1, 1).len(), 2 * 3 * 6);
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        for v in generate_sphere_mesh(8, 16) {
            let len = Vec3::from(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let mesh = generate_sphere_mesh(8, 16);
        for tri in mesh.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let normal = (b - a).cross(c - a);
            // Pole triangles are degenerate.
            if normal.length() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle at {centroid}");
        }
    }

    #[test]
    fn poles() {
        let north = sphere_point(0, 0, 4, 8);
        assert!((north[1] - 1.0).abs() < 1e-6);
        let south = sphere_point(4, 0, 4, 8);
        assert!((south[1] + 1.0).abs() < 1e-5);
    }
}
