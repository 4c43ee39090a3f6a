//! Orbit controls: drag to rotate around the target, optional damping and
//! auto-rotation. Zoom and pan are not supported.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use marble_config::schema::CameraConfig;

use super::types::PerspectiveCamera;

/// Minimum distance of the polar angle from either pole.
const POLAR_EPS: f32 = 1e-3;

/// Below this the pending rotation is treated as settled.
const SETTLE_EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: offset.x.hypot(offset.z).atan2(offset.y),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitController {
    enable_damping: bool,
    damping_factor: f32,
    auto_rotate: bool,
    auto_rotate_speed: f32,
    rotate_speed: f32,
    pending: Spherical,
    drag_from: Option<(f32, f32)>,
}

impl OrbitController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor as f32,
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed as f32,
            rotate_speed: config.rotate_speed as f32,
            pending: Spherical::default(),
            drag_from: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag_from = Some((x, y));
    }

    /// Rotate by the pointer travel since the last event. A full viewport
    /// height of travel is one revolution.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some((last_x, last_y)) = self.drag_from else {
            return;
        };
        self.drag_from = Some((x, y));
        if viewport_height <= 0.0 {
            return;
        }
        let dx = (x - last_x) * self.rotate_speed;
        let dy = (y - last_y) * self.rotate_speed;
        self.rotate_left(TAU * dx / viewport_height);
        self.rotate_up(TAU * dy / viewport_height);
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    /// Auto-rotation angle for `delta_secs`: `speed` full turns per minute.
    fn auto_rotation_angle(&self, delta_secs: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * delta_secs
    }

    /// Apply pending rotation to `camera`. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, delta_secs: f32) -> bool {
        if self.auto_rotate && !self.is_dragging() {
            let angle = self.auto_rotation_angle(delta_secs);
            self.rotate_left(angle);
        }

        let mut spherical = Spherical::from_offset(camera.position - camera.target);
        if self.enable_damping {
            spherical.theta += self.pending.theta * self.damping_factor;
            spherical.phi += self.pending.phi * self.damping_factor;
            self.pending.theta *= 1.0 - self.damping_factor;
            self.pending.phi *= 1.0 - self.damping_factor;
        } else {
            spherical.theta += self.pending.theta;
            spherical.phi += self.pending.phi;
            self.pending.theta = 0.0;
            self.pending.phi = 0.0;
        }
        spherical.phi = spherical.phi.clamp(POLAR_EPS, PI - POLAR_EPS);

        if self.pending.theta.abs() < SETTLE_EPS && self.pending.phi.abs() < SETTLE_EPS {
            self.pending.theta = 0.0;
            self.pending.phi = 0.0;
        }

        let position = camera.target + spherical.to_offset();
        let moved = position.distance_squared(camera.position) > 1e-12;
        camera.position = position;
        moved
    }
}
