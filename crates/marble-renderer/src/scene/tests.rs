use glam::Vec3;
use marble_common::MarbleError;
use marble_config::schema::{AssetsConfig, MarbleConfig, RenderParams};

use super::*;
use crate::assets::{RawPanorama, TextureData, TextureRole};
use crate::environment::{prefilter, PrefilterSettings};
use crate::gpu::GpuContext;

fn small_settings() -> PrefilterSettings {
    PrefilterSettings {
        diffuse_size: 4,
        specular_size: 8,
        specular_mip_count: 2,
        diffuse_samples: 8,
        specular_samples: 8,
    }
}

fn grey_png(value: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([value, value, value, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn hdr_bytes() -> Vec<u8> {
    let pixels = vec![image::Rgb([0.5f32, 0.5, 0.5]); 8 * 4];
    let mut bytes = Vec::new();
    image::codecs::hdr::HdrEncoder::new(&mut bytes)
        .encode(&pixels, 8, 4)
        .unwrap();
    bytes
}

fn write_assets(dir: &std::path::Path) -> AssetsConfig {
    let height = dir.join("height.png");
    let disp = dir.join("disp.png");
    let env = dir.join("env.hdr");
    std::fs::write(&height, grey_png(255)).unwrap();
    std::fs::write(&disp, grey_png(128)).unwrap();
    std::fs::write(&env, hdr_bytes()).unwrap();
    AssetsConfig {
        height_map: height.display().to_string(),
        displacement_map: disp.display().to_string(),
        environment: env.display().to_string(),
        request_timeout_secs: 5,
    }
}

fn synthetic_assets() -> LoadedAssets {
    let map = |role: TextureRole, value: u8| TextureData {
        url: format!("mem://{}", role.binding_name()),
        role,
        width: 2,
        height: 2,
        pixels: [value, value, value, 255].repeat(4),
        sampler: role.sampler_settings(),
    };
    let panorama = RawPanorama {
        source: "mem://env".into(),
        width: 8,
        height: 4,
        pixels: vec![Vec3::splat(0.5); 32],
    };
    LoadedAssets {
        height_map: map(TextureRole::HeightMap, 255),
        displacement_map: map(TextureRole::DisplacementMap, 128),
        probe: prefilter(panorama, &small_settings()).unwrap(),
    }
}

#[tokio::test]
async fn load_assets_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_assets(dir.path());
    let assets = load_assets(&config, small_settings()).await.unwrap();
    assert_eq!(assets.height_map.role, TextureRole::HeightMap);
    assert_eq!(assets.displacement_map.role, TextureRole::DisplacementMap);
    assert_eq!(assets.height_map.width, 4);
    assert_eq!(assets.probe.specular_mip_count(), 2);
}

#[tokio::test]
async fn one_missing_asset_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_assets(dir.path());
    config.displacement_map = dir.path().join("nope.png").display().to_string();
    let err = load_assets(&config, small_settings()).await.err().unwrap();
    match err {
        MarbleError::ResourceLoad(e) => assert!(e.url.ends_with("nope.png"), "{e}"),
        other => panic!("unexpected error: {other}"),
    }
}

async fn headless_gpu() -> Option<GpuContext> {
    match GpuContext::headless(64, 64).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("skipping GPU test: {e}");
            None
        }
    }
}

#[tokio::test]
async fn renders_opaque_marble_on_transparent_background() {
    let Some(gpu) = headless_gpu().await else {
        return;
    };
    let mut scene = MarbleScene::new(&gpu, synthetic_assets(), &MarbleConfig::default())
        .await
        .unwrap();
    assert!(scene.is_running());
    scene.frame(&gpu, 1.0 / 60.0).unwrap();
    assert_eq!(scene.frames(), 1);

    let pixels = gpu.read_pixels().unwrap();
    let at = |x: usize, y: usize| &pixels[(y * 64 + x) * 4..(y * 64 + x) * 4 + 4];
    assert_eq!(at(0, 0)[3], 0, "corner should stay clear");
    assert_eq!(at(32, 32)[3], 255, "sphere should be opaque");
}

#[tokio::test]
async fn close_stops_frames() {
    let Some(gpu) = headless_gpu().await else {
        return;
    };
    let mut scene = MarbleScene::new(&gpu, synthetic_assets(), &MarbleConfig::default())
        .await
        .unwrap();
    scene.close();
    let time = scene.time();
    scene.frame(&gpu, 1.0).unwrap();
    assert_eq!(scene.frames(), 0);
    assert_eq!(scene.time(), time);
}

#[tokio::test]
async fn changing_iterations_rebuilds_program() {
    let Some(gpu) = headless_gpu().await else {
        return;
    };
    let mut scene = MarbleScene::new(&gpu, synthetic_assets(), &MarbleConfig::default())
        .await
        .unwrap();
    let render = RenderParams {
        iterations: 8,
        speed: 0.5,
        ..Default::default()
    };
    scene.apply_params(&gpu, &render).await.unwrap();
    assert_eq!(scene.params().iterations.get(), 8);
    assert!(scene
        .program()
        .source
        .contains("const MARCH_ITERATIONS: u32 = 8u;"));
    scene.frame(&gpu, 1.0).unwrap();
    assert!((scene.time() - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn zero_iterations_rejected_and_scene_kept() {
    let Some(gpu) = headless_gpu().await else {
        return;
    };
    let mut scene = MarbleScene::new(&gpu, synthetic_assets(), &MarbleConfig::default())
        .await
        .unwrap();
    let render = RenderParams {
        iterations: 0,
        ..Default::default()
    };
    let err = scene.apply_params(&gpu, &render).await.unwrap_err();
    assert!(matches!(err, MarbleError::Config(_)));
    assert_eq!(scene.params().iterations.get(), 48);
}
