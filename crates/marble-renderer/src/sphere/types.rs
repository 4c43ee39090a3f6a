//! Sphere mesh vertex types and buffer layout.

/// A single vertex of the sphere mesh.
///
/// Layout: position(vec3) + normal(vec3) = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl SphereVertex {
    /// wgpu vertex buffer layout for `SphereVertex`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SphereVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    };
}

/// Tessellation of the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereLod {
    pub latitudes: u32,
    pub longitudes: u32,
}

impl SphereLod {
    pub const LOW: Self = Self {
        latitudes: 16,
        longitudes: 32,
    };
    pub const STANDARD: Self = Self {
        latitudes: 32,
        longitudes: 64,
    };
}

impl Default for SphereLod {
    fn default() -> Self {
        Self::STANDARD
    }
}
