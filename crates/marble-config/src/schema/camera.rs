//! Orbit camera configuration.

use serde::{Deserialize, Serialize};

/// Perspective camera and orbit controller settings.
///
/// Zoom is always disabled; only rotation responds to input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Distance from the sphere center.
    pub distance: f64,
    pub near: f64,
    pub far: f64,
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per frame (0.0-1.0).
    pub damping_factor: f64,
    pub auto_rotate: bool,
    /// 2.0 completes one revolution every 30 seconds at 60 fps.
    pub auto_rotate_speed: f64,
    pub rotate_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            distance: 2.0,
            near: 0.1,
            far: 1000.0,
            enable_damping: true,
            damping_factor: 0.05,
            auto_rotate: true,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
        }
    }
}
