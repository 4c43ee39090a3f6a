//! GPU upload of prefiltered probe maps as `Rgba16Float` cube textures.

use half::f16;

use super::prefilter::{CubeFaces, ProbeMaps};

fn f32_to_f16_bits(data: &[f32]) -> Vec<u16> {
    data.iter().map(|v| f16::from_f32(*v).to_bits()).collect()
}

/// Light probe bound to the material: irradiance cube, specular cube with
/// mips, and a trilinear sampler.
pub struct Probe {
    _diffuse_texture: wgpu::Texture,
    pub diffuse_view: wgpu::TextureView,
    _specular_texture: wgpu::Texture,
    pub specular_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    specular_mip_count: u32,
}

impl Probe {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, maps: &ProbeMaps) -> Self {
        let (diffuse_texture, diffuse_view) =
            upload_cube(device, queue, "probe diffuse", std::slice::from_ref(&maps.diffuse));
        let (specular_texture, specular_view) =
            upload_cube(device, queue, "probe specular", &maps.specular);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("probe sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            _diffuse_texture: diffuse_texture,
            diffuse_view,
            _specular_texture: specular_texture,
            specular_view,
            sampler,
            specular_mip_count: maps.specular_mip_count().max(1),
        }
    }

    /// Highest specular mip level, used to map roughness to LOD.
    pub fn max_lod(&self) -> f32 {
        (self.specular_mip_count - 1) as f32
    }
}

fn upload_cube(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    levels: &[CubeFaces],
) -> (wgpu::Texture, wgpu::TextureView) {
    let base = levels.first().map(|l| l.size).unwrap_or(1);
    let mip_count = levels.len().max(1) as u32;

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: base,
            height: base,
            depth_or_array_layers: 6,
        },
        mip_level_count: mip_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba16Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (mip, level) in levels.iter().enumerate() {
        for (face, data) in level.faces.iter().enumerate() {
            let half = f32_to_f16_bits(data);
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip as u32,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                bytemuck::cast_slice(&half),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.size * 8),
                    rows_per_image: Some(level.size),
                },
                wgpu::Extent3d {
                    width: level.size,
                    height: level.size,
                    depth_or_array_layers: 1,
                },
            );
        }
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some(label),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        mip_level_count: Some(mip_count),
        ..Default::default()
    });
    (texture, view)
}
