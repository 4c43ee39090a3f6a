use std::time::Duration;

use marble_common::{MarbleError, ResourceLoadError};
use marble_config::schema::AssetsConfig;
use tracing::info;

use crate::assets::{ResourceLoader, TextureData, TextureRole};
use crate::environment::{prefilter, PrefilterSettings, ProbeMaps};

/// Everything the scene needs from disk or network, decoded and ready to
/// upload.
pub struct LoadedAssets {
    pub height_map: TextureData,
    pub displacement_map: TextureData,
    pub probe: ProbeMaps,
}

/// Fetch both maps and the environment concurrently, then prefilter the
/// environment. The first failure aborts the whole load.
pub async fn load_assets(
    config: &AssetsConfig,
    settings: PrefilterSettings,
) -> Result<LoadedAssets, MarbleError> {
    let loader = ResourceLoader::new(Duration::from_secs(config.request_timeout_secs))?;

    let (height_map, displacement_map, panorama) = tokio::try_join!(
        loader.load_texture(&config.height_map, TextureRole::HeightMap),
        loader.load_texture(&config.displacement_map, TextureRole::DisplacementMap),
        loader.load_environment(&config.environment),
    )?;

    let source = panorama.source.clone();
    let probe = tokio::task::spawn_blocking(move || prefilter(panorama, &settings))
        .await
        .map_err(|e| ResourceLoadError::new(&source, format!("prefilter task failed: {e}")))??;

    info!(
        specular_mips = probe.specular_mip_count(),
        "assets ready"
    );
    Ok(LoadedAssets {
        height_map,
        displacement_map,
        probe,
    })
}
