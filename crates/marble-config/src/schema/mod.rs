//! Configuration schema types for Marble.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assets;
mod camera;
mod render;
mod system;
mod window;

pub use assets::*;
pub use camera::*;
pub use render::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Marble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct MarbleConfig {
    pub render: RenderParams,
    pub assets: AssetsConfig,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub logging: LoggingConfig,
}
