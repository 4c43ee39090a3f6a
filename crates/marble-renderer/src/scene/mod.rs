//! The marble scene: asset loading, GPU resources, and per-frame drawing.

mod init;
mod material;
mod scene;

#[cfg(test)]
mod tests;

pub use init::{load_assets, LoadedAssets};
pub use material::MaterialBuffer;
pub use scene::MarbleScene;
