//! Perspective camera and the orbit controller that moves it.

mod orbit;
mod types;

pub use orbit::OrbitController;
pub use types::{CameraUniforms, PerspectiveCamera};
