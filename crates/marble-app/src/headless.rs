//! Offscreen rendering to a PNG file.

use std::path::Path;

use marble_common::MarbleError;
use marble_config::MarbleConfig;
use marble_renderer::{load_assets, GpuContext, MarbleScene, PrefilterSettings};
use tracing::info;

/// Fixed step between captured frames.
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Load assets, render `frames` frames offscreen, and write the last one to
/// `path`.
pub fn run(config: &MarbleConfig, path: &Path, frames: u32) -> Result<(), MarbleError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let assets = runtime.block_on(load_assets(&config.assets, PrefilterSettings::default()))?;
    let gpu = runtime.block_on(GpuContext::headless(
        config.window.width,
        config.window.height,
    ))?;
    let mut scene = runtime.block_on(MarbleScene::new(&gpu, assets, config))?;

    for _ in 0..frames.max(1) {
        scene.frame(&gpu, FRAME_DELTA)?;
    }
    let pixels = gpu.read_pixels()?;
    scene.close();

    let image = image::RgbaImage::from_raw(gpu.size.width, gpu.size.height, pixels)
        .ok_or_else(|| MarbleError::Renderer("readback size does not match target".into()))?;
    image
        .save(path)
        .map_err(|e| MarbleError::Other(format!("failed to write {}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        frames,
        time = scene.time(),
        "marble captured"
    );
    Ok(())
}
