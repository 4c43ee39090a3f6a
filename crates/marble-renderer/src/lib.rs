//! GPU renderer for the volumetric marble sphere.
//!
//! A standard physically-based WGSL template is composed with injected
//! raymarching code; the result shades a unit sphere lit by a prefiltered
//! environment probe. A CPU reference of the raymarch lives in [`volume`].

pub mod animation;
pub mod assets;
pub mod camera;
pub mod environment;
pub mod gpu;
pub mod scene;
pub mod shader;
pub mod sphere;
pub mod volume;

pub use animation::{AnimationDriver, FrameClock, FrameLoop, FrameLoopState};
pub use assets::{ResourceLoader, SamplerSettings, TextureData, TextureRole};
pub use camera::{OrbitController, PerspectiveCamera};
pub use environment::{prefilter, PrefilterSettings, Probe, ProbeMaps};
pub use gpu::{GpuContext, RendererError};
pub use scene::{load_assets, LoadedAssets, MarbleScene};
pub use shader::{augment, ShaderInjection, ShaderProgram, UniformBlock, UniformValue};
pub use volume::{march_volume, MarchParams};
