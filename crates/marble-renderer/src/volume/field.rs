use crate::assets::TextureData;

/// A 2D scalar/color field looked up by UV, like a sampled texture.
pub trait FieldSampler {
    fn sample(&self, uv: [f32; 2]) -> [f32; 4];
}

/// Nearest-neighbour texel grid with per-axis address modes.
#[derive(Debug, Clone)]
pub struct GridField {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
    wrap_u: wgpu::AddressMode,
    wrap_v: wgpu::AddressMode,
}

impl GridField {
    pub fn new(
        width: u32,
        height: u32,
        texels: Vec<[f32; 4]>,
        wrap_u: wgpu::AddressMode,
        wrap_v: wgpu::AddressMode,
    ) -> Self {
        assert_eq!(texels.len(), (width * height) as usize, "texel count");
        Self {
            width,
            height,
            texels,
            wrap_u,
            wrap_v,
        }
    }

    /// A 1x1 field returning `value` everywhere.
    pub fn uniform(value: f32) -> Self {
        Self::new(
            1,
            1,
            vec![[value, value, value, 1.0]],
            wgpu::AddressMode::Repeat,
            wgpu::AddressMode::Repeat,
        )
    }

    /// View decoded texture data the way the GPU sampler sees it.
    pub fn from_texture(data: &TextureData) -> Self {
        let texels = data
            .pixels
            .chunks_exact(4)
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();
        Self::new(
            data.width,
            data.height,
            texels,
            data.sampler.address_mode_u,
            data.sampler.address_mode_v,
        )
    }
}

/// Repeat wraps; every other mode clamps to the edge texel.
fn wrap_index(i: i64, n: u32, mode: wgpu::AddressMode) -> u32 {
    let n = i64::from(n);
    let wrapped = match mode {
        wgpu::AddressMode::Repeat => i.rem_euclid(n),
        _ => i.clamp(0, n - 1),
    };
    wrapped as u32
}

impl FieldSampler for GridField {
    fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        let x = (uv[0] * self.width as f32).floor() as i64;
        let y = (uv[1] * self.height as f32).floor() as i64;
        let x = wrap_index(x, self.width, self.wrap_u);
        let y = wrap_index(y, self.height, self.wrap_v);
        self.texels[(y * self.width + x) as usize]
    }
}

impl<F: Fn([f32; 2]) -> [f32; 4]> FieldSampler for F {
    fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        self(uv)
    }
}
