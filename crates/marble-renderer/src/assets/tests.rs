//! Tests for asset sources, decoding, loading, and sampler settings.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::loader::{decode_panorama, decode_texture};
use super::*;

fn loader() -> ResourceLoader {
    ResourceLoader::new(Duration::from_secs(5)).unwrap()
}

/// 2x2 PNG: top row red, bottom row blue.
fn two_row_png() -> Vec<u8> {
    let mut img = image::RgbaImage::new(2, 2);
    for x in 0..2 {
        img.put_pixel(x, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(x, 1, image::Rgba([0, 0, 255, 255]));
    }
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn hdr_bytes(width: usize, height: usize, value: [f32; 3]) -> Vec<u8> {
    let pixels = vec![image::Rgb(value); width * height];
    let mut bytes = Vec::new();
    image::codecs::hdr::HdrEncoder::new(&mut bytes)
        .encode(&pixels, width, height)
        .unwrap();
    bytes
}

/// Serve one canned HTTP response on a local port.
async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let header = format!(
            "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/asset")
}

// -- sampler settings -------------------------------------------------------

#[test]
fn displacement_map_repeats_on_both_axes() {
    let s = TextureRole::DisplacementMap.sampler_settings();
    assert_eq!(s.address_mode_u, wgpu::AddressMode::Repeat);
    assert_eq!(s.address_mode_v, wgpu::AddressMode::Repeat);
}

#[test]
fn both_maps_minify_nearest() {
    for role in [TextureRole::HeightMap, TextureRole::DisplacementMap] {
        let s = role.sampler_settings();
        assert_eq!(s.min_filter, wgpu::FilterMode::Nearest, "{role:?}");
        assert_eq!(s.mag_filter, wgpu::FilterMode::Linear, "{role:?}");
        assert_eq!(s.mip_level_count, 1);
    }
}

#[test]
fn sampler_descriptor_carries_settings() {
    let s = TextureRole::DisplacementMap.sampler_settings();
    let desc = s.descriptor("displacement_map");
    assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
    assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
    assert_eq!(desc.min_filter, wgpu::FilterMode::Nearest);
    assert_ne!(desc.address_mode_u, wgpu::SamplerDescriptor::default().address_mode_u);
}

#[test]
fn decoded_texture_uses_role_settings() {
    let tex = decode_texture(&two_row_png(), "mem://disp", TextureRole::DisplacementMap).unwrap();
    assert_eq!(tex.sampler, TextureRole::DisplacementMap.sampler_settings());
}

// -- sources ----------------------------------------------------------------

#[test]
fn asset_source_classification() {
    assert_eq!(
        AssetSource::parse("https://example.com/a.hdr").unwrap(),
        AssetSource::Remote("https://example.com/a.hdr".into())
    );
    assert_eq!(
        AssetSource::parse("file:///tmp/a.png").unwrap(),
        AssetSource::Local("/tmp/a.png".into())
    );
    assert_eq!(
        AssetSource::parse("assets/a.png").unwrap(),
        AssetSource::Local("assets/a.png".into())
    );
}

#[test]
fn unsupported_scheme_is_rejected() {
    let err = AssetSource::parse("ftp://example.com/a.png").unwrap_err();
    assert_eq!(err.url, "ftp://example.com/a.png");
    assert!(err.reason.contains("ftp"));
    assert!(AssetSource::parse("   ").is_err());
}

// -- decoding ---------------------------------------------------------------

#[test]
fn texture_rows_are_flipped_bottom_up() {
    let tex = decode_texture(&two_row_png(), "mem://png", TextureRole::HeightMap).unwrap();
    assert_eq!((tex.width, tex.height), (2, 2));
    // Image bottom (blue) becomes row 0.
    assert_eq!(&tex.pixels[0..4], &[0, 0, 255, 255]);
    assert_eq!(&tex.pixels[12..16], &[255, 0, 0, 255]);
}

#[test]
fn garbage_bytes_fail_with_url() {
    let err = decode_texture(b"not an image", "mem://junk", TextureRole::HeightMap).unwrap_err();
    assert_eq!(err.url, "mem://junk");
    assert!(err.reason.contains("decode failed"));
}

#[test]
fn hdr_panorama_decodes_linear_values() {
    let pano = decode_panorama(&hdr_bytes(4, 2, [0.5, 1.0, 2.0]), "mem://hdr").unwrap();
    assert_eq!((pano.width, pano.height), (4, 2));
    assert_eq!(pano.pixels.len(), 8);
    let p = pano.pixel(3, 1);
    assert!((p.x - 0.5).abs() < 0.02);
    assert!((p.z - 2.0).abs() < 0.05);
}

// -- loading ----------------------------------------------------------------

#[tokio::test]
async fn load_texture_from_file_path_and_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("height.png");
    std::fs::write(&path, two_row_png()).unwrap();

    let loader = loader();
    let bare = loader
        .load_texture(path.to_str().unwrap(), TextureRole::HeightMap)
        .await
        .unwrap();
    let url = format!("file://{}", path.display());
    let via_url = loader
        .load_texture(&url, TextureRole::HeightMap)
        .await
        .unwrap();
    assert_eq!(bare.pixels, via_url.pixels);
    assert_eq!(via_url.url, url);
}

#[tokio::test]
async fn missing_file_is_resource_error() {
    let err = loader()
        .load_texture("/nonexistent/marble/height.png", TextureRole::HeightMap)
        .await
        .unwrap_err();
    assert_eq!(err.url, "/nonexistent/marble/height.png");
}

#[tokio::test]
async fn load_environment_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.hdr");
    std::fs::write(&path, hdr_bytes(8, 4, [1.0, 1.0, 1.0])).unwrap();

    let pano = loader()
        .load_environment(path.to_str().unwrap())
        .await
        .unwrap();
    assert_eq!((pano.width, pano.height), (8, 4));
    assert!(!pano.is_empty());
}

#[tokio::test]
async fn load_texture_over_http() {
    let url = serve_once("HTTP/1.1 200 OK", two_row_png()).await;
    let tex = loader()
        .load_texture(&url, TextureRole::DisplacementMap)
        .await
        .unwrap();
    assert_eq!((tex.width, tex.height), (2, 2));
    assert_eq!(tex.url, url);
}

#[tokio::test]
async fn http_error_status_is_resource_error() {
    let url = serve_once("HTTP/1.1 404 Not Found", Vec::new()).await;
    let err = loader().load_environment(&url).await.unwrap_err();
    assert_eq!(err.url, url);
    assert!(err.reason.contains("404"));
}

#[tokio::test]
async fn unreachable_host_is_resource_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}/env.hdr");
    let err = loader().load_environment(&url).await.unwrap_err();
    assert_eq!(err.url, url);
}
