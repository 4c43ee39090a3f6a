//! Async fetching and decoding of texture and panorama sources.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use marble_common::ResourceLoadError;
use tracing::{debug, info};

use super::panorama::RawPanorama;
use super::texture::{TextureData, TextureRole};

/// Where an asset URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Remote(String),
    Local(PathBuf),
}

impl AssetSource {
    /// Classify `url` as remote (`http://`, `https://`) or local
    /// (`file://` or a bare path). Other schemes are rejected.
    pub fn parse(url: &str) -> Result<Self, ResourceLoadError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ResourceLoadError::new(url, "empty URL"));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(AssetSource::Remote(trimmed.to_string()));
        }
        if let Some(path) = trimmed.strip_prefix("file://") {
            return Ok(AssetSource::Local(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(ResourceLoadError::new(
                url,
                format!("unsupported URL scheme `{scheme}`"),
            ));
        }
        Ok(AssetSource::Local(PathBuf::from(trimmed)))
    }
}

/// Fetches and decodes marble assets.
pub struct ResourceLoader {
    client: reqwest::Client,
}

impl ResourceLoader {
    pub fn new(request_timeout: Duration) -> Result<Self, ResourceLoadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(request_timeout.min(Duration::from_secs(10)))
            .timeout(request_timeout)
            .build()
            .map_err(|e| ResourceLoadError::new("<http client>", e.to_string()))?;
        Ok(Self { client })
    }

    /// Load and decode a greyscale map, applying the role's sampler settings.
    pub async fn load_texture(
        &self,
        url: &str,
        role: TextureRole,
    ) -> Result<TextureData, ResourceLoadError> {
        let bytes = self.fetch_bytes(url).await?;
        let owned_url = url.to_string();
        let texture = tokio::task::spawn_blocking(move || decode_texture(&bytes, &owned_url, role))
            .await
            .map_err(|e| ResourceLoadError::new(url, format!("decode task failed: {e}")))??;
        info!(
            url,
            role = role.binding_name(),
            width = texture.width,
            height = texture.height,
            "texture loaded"
        );
        Ok(texture)
    }

    /// Load and decode an equirectangular HDR panorama.
    pub async fn load_environment(&self, url: &str) -> Result<RawPanorama, ResourceLoadError> {
        let bytes = self.fetch_bytes(url).await?;
        let owned_url = url.to_string();
        let panorama = tokio::task::spawn_blocking(move || decode_panorama(&bytes, &owned_url))
            .await
            .map_err(|e| ResourceLoadError::new(url, format!("decode task failed: {e}")))??;
        info!(
            url,
            width = panorama.width,
            height = panorama.height,
            "environment loaded"
        );
        Ok(panorama)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ResourceLoadError> {
        match AssetSource::parse(url)? {
            AssetSource::Remote(remote) => {
                debug!(url = %remote, "fetching remote asset");
                let response = self
                    .client
                    .get(&remote)
                    .send()
                    .await
                    .map_err(|e| ResourceLoadError::new(url, e.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ResourceLoadError::new(url, format!("HTTP status {status}")));
                }
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ResourceLoadError::new(url, e.to_string()))?;
                Ok(bytes.to_vec())
            }
            AssetSource::Local(path) => {
                debug!(path = %path.display(), "reading local asset");
                tokio::fs::read(&path)
                    .await
                    .map_err(|e| ResourceLoadError::new(url, format!("{}: {e}", path.display())))
            }
        }
    }
}

/// Decode PNG/JPEG bytes into bottom-up RGBA8 rows.
pub(crate) fn decode_texture(
    bytes: &[u8],
    url: &str,
    role: TextureRole,
) -> Result<TextureData, ResourceLoadError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ResourceLoadError::new(url, format!("decode failed: {e}")))?;
    let rgba = image.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceLoadError::new(url, "image has no pixels"));
    }

    Ok(TextureData {
        url: url.to_string(),
        role,
        width,
        height,
        pixels: rgba.into_raw(),
        sampler: role.sampler_settings(),
    })
}

/// Decode Radiance HDR (or any supported format) into linear RGB.
pub(crate) fn decode_panorama(bytes: &[u8], url: &str) -> Result<RawPanorama, ResourceLoadError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ResourceLoadError::new(url, format!("decode failed: {e}")))?;
    let rgb = image.to_rgb32f();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceLoadError::new(url, "panorama has no pixels"));
    }
    let pixels = rgb
        .pixels()
        .map(|p| Vec3::new(p.0[0], p.0[1], p.0[2]))
        .collect();

    Ok(RawPanorama {
        source: url.to_string(),
        width,
        height,
        pixels,
    })
}
