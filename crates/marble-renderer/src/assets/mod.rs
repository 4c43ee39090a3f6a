//! Resource loading: greyscale maps and the HDR environment panorama.
//!
//! Every load either yields fully decoded data or a
//! [`ResourceLoadError`](marble_common::ResourceLoadError) naming the URL.

mod loader;
mod panorama;
mod texture;

#[cfg(test)]
mod tests;

pub use loader::{AssetSource, ResourceLoader};
pub use panorama::RawPanorama;
pub use texture::{GpuTexture, SamplerSettings, TextureData, TextureRole};
