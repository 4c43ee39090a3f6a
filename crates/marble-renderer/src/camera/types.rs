use glam::{Mat4, Vec3, Vec4};
use marble_config::schema::CameraConfig;

/// Camera data uploaded to bind group 0.
///
/// Layout matches the WGSL `Camera` struct: two column-major matrices then
/// the camera position in model space and in world space (w = 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [f32; 16],
    pub model: [f32; 16],
    pub camera_local: [f32; 4],
    pub camera_world: [f32; 4],
}

/// Right-handed perspective camera looking at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Camera on the +Z axis at the configured distance.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y: (config.fov_degrees as f32).to_radians(),
            aspect,
            near: config.near as f32,
            far: config.far as f32,
            position: Vec3::new(0.0, 0.0, config.distance as f32),
            target: Vec3::ZERO,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection into wgpu clip space (depth 0..1).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn uniforms(&self, model: Mat4) -> CameraUniforms {
        let view_proj = self.projection() * self.view();
        let local = model.inverse() * self.position.extend(1.0);
        CameraUniforms {
            view_proj: view_proj.to_cols_array(),
            model: model.to_cols_array(),
            camera_local: local.to_array(),
            camera_world: Vec4::from((self.position, 1.0)).to_array(),
        }
    }
}
