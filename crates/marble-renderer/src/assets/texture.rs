//! Decoded texture data and its sampling mode.

/// Which map a texture plays in the marble shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRole {
    /// Static height field; the red channel is the occupancy source.
    HeightMap,
    /// Tileable field scrolled over time to deform the sample point.
    DisplacementMap,
}

impl TextureRole {
    /// Binding name in the composed shader.
    pub fn binding_name(self) -> &'static str {
        match self {
            TextureRole::HeightMap => "height_map",
            TextureRole::DisplacementMap => "displacement_map",
        }
    }

    /// Sampler settings every texture of this role must use.
    ///
    /// The displacement map scrolls, so it repeats on both axes. Both maps
    /// minify with nearest filtering so the equirect seam at `u = 0/1`
    /// does not bleed.
    pub fn sampler_settings(self) -> SamplerSettings {
        let wrap = match self {
            TextureRole::HeightMap => wgpu::AddressMode::ClampToEdge,
            TextureRole::DisplacementMap => wgpu::AddressMode::Repeat,
        };
        SamplerSettings {
            address_mode_u: wrap,
            address_mode_v: wrap,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mip_level_count: 1,
        }
    }
}

/// Address and filter modes for one texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    pub address_mode_u: wgpu::AddressMode,
    pub address_mode_v: wgpu::AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
    pub mip_level_count: u32,
}

impl SamplerSettings {
    pub fn descriptor<'a>(&self, label: &'a str) -> wgpu::SamplerDescriptor<'a> {
        wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: self.address_mode_u,
            address_mode_v: self.address_mode_v,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        }
    }
}

/// A fully decoded RGBA8 texture, rows ordered bottom-up.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub url: String,
    pub role: TextureRole,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub sampler: SamplerSettings,
}

/// A texture uploaded to the GPU with its sampler.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub settings: SamplerSettings,
}

impl GpuTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData) -> Self {
        let label = data.role.binding_name();
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: data.sampler.mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.width * 4),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&data.sampler.descriptor(label));
        tracing::debug!(
            role = label,
            width = data.width,
            height = data.height,
            "uploaded texture"
        );

        Self {
            texture,
            view,
            sampler,
            settings: data.sampler,
        }
    }
}
