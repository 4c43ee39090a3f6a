//! CPU convolution of an equirectangular panorama into probe cube maps.

use glam::Vec3;
use marble_common::ResourceLoadError;
use tracing::{debug, info};

use super::sampling::{
    cosine_sample_hemisphere, cubemap_direction, hammersley, importance_sample_ggx, reflect,
    sample_equirect,
};
use crate::assets::RawPanorama;

/// Resolution and sample counts for the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefilterSettings {
    pub diffuse_size: u32,
    pub specular_size: u32,
    pub specular_mip_count: u32,
    pub diffuse_samples: u32,
    pub specular_samples: u32,
}

impl Default for PrefilterSettings {
    fn default() -> Self {
        Self {
            diffuse_size: 32,
            specular_size: 64,
            specular_mip_count: 5,
            diffuse_samples: 64,
            specular_samples: 96,
        }
    }
}

/// Six RGBA f32 faces of one cube map level.
#[derive(Debug, Clone)]
pub struct CubeFaces {
    pub size: u32,
    pub faces: [Vec<f32>; 6],
}

impl CubeFaces {
    fn new(size: u32) -> Self {
        let len = (size * size * 4) as usize;
        Self {
            size,
            faces: std::array::from_fn(|_| vec![0.0; len]),
        }
    }

    fn fill(&mut self, mut texel: impl FnMut(Vec3) -> Vec3) {
        let size = self.size;
        for (face, data) in self.faces.iter_mut().enumerate() {
            for y in 0..size {
                for x in 0..size {
                    let c = texel(cubemap_direction(face, x, y, size));
                    let idx = ((y * size + x) * 4) as usize;
                    data[idx..idx + 4].copy_from_slice(&[c.x, c.y, c.z, 1.0]);
                }
            }
        }
    }
}

/// Prefiltered probe data ready for upload.
#[derive(Debug, Clone)]
pub struct ProbeMaps {
    pub diffuse: CubeFaces,
    /// Mip chain; level `i` is convolved for roughness `i / (n - 1)`.
    pub specular: Vec<CubeFaces>,
}

impl ProbeMaps {
    pub fn specular_mip_count(&self) -> u32 {
        self.specular.len() as u32
    }
}

/// Convolve `panorama` into a diffuse irradiance cube and a specular mip
/// chain. The panorama is consumed and freed when this returns.
pub fn prefilter(
    panorama: RawPanorama,
    settings: &PrefilterSettings,
) -> Result<ProbeMaps, ResourceLoadError> {
    if panorama.is_empty() {
        return Err(ResourceLoadError::new(
            &panorama.source,
            "panorama has no pixels",
        ));
    }
    let expected = panorama.width as usize * panorama.height as usize;
    if panorama.pixels.len() != expected {
        return Err(ResourceLoadError::new(
            &panorama.source,
            format!(
                "panorama has {} pixels, expected {expected}",
                panorama.pixels.len()
            ),
        ));
    }
    if settings.diffuse_size == 0
        || settings.specular_size == 0
        || settings.specular_mip_count == 0
        || settings.diffuse_samples == 0
        || settings.specular_samples == 0
    {
        return Err(ResourceLoadError::new(
            &panorama.source,
            "prefilter sizes and sample counts must be positive",
        ));
    }

    let mip_count = settings
        .specular_mip_count
        .min(settings.specular_size.ilog2() + 1);

    let diffuse = diffuse_cube(&panorama, settings.diffuse_size, settings.diffuse_samples);
    debug!(size = settings.diffuse_size, "diffuse irradiance done");

    let specular = (0..mip_count)
        .map(|mip| {
            let size = (settings.specular_size >> mip).max(1);
            let roughness = mip as f32 / (mip_count as f32 - 1.0).max(1.0);
            specular_cube(&panorama, size, roughness, settings.specular_samples)
        })
        .collect();

    info!(
        source = %panorama.source,
        diffuse_size = settings.diffuse_size,
        specular_size = settings.specular_size,
        mips = mip_count,
        "environment prefiltered"
    );
    Ok(ProbeMaps { diffuse, specular })
}

fn diffuse_cube(image: &RawPanorama, size: u32, samples: u32) -> CubeFaces {
    let mut cube = CubeFaces::new(size);
    cube.fill(|n| {
        let mut sum = Vec3::ZERO;
        let mut weight = 0.0f32;
        for i in 0..samples {
            let l = cosine_sample_hemisphere(n, hammersley(i, samples));
            let n_dot_l = n.dot(l).max(0.0);
            if n_dot_l > 0.0 {
                sum += sample_equirect(image, l) * n_dot_l;
                weight += n_dot_l;
            }
        }
        if weight > 0.0 {
            sum / weight
        } else {
            sum
        }
    });
    cube
}

fn specular_cube(image: &RawPanorama, size: u32, roughness: f32, samples: u32) -> CubeFaces {
    let mut cube = CubeFaces::new(size);
    cube.fill(|r| {
        let mut sum = Vec3::ZERO;
        let mut weight = 0.0f32;
        for i in 0..samples {
            let h = importance_sample_ggx(r, hammersley(i, samples), roughness);
            let l = reflect(-r, h).normalize();
            let n_dot_l = r.dot(l).max(0.0);
            if n_dot_l > 0.0 {
                sum += sample_equirect(image, l) * n_dot_l;
                weight += n_dot_l;
            }
        }
        if weight > 0.0 {
            sum / weight
        } else {
            sum
        }
    });
    cube
}
