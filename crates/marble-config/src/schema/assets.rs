//! Asset source configuration.

use serde::{Deserialize, Serialize};

/// Where the marble's maps and environment come from.
///
/// Each entry is an `http(s)://` URL, a `file://` URL, or a plain path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Greyscale height field sampled by the raymarch (red channel).
    pub height_map: String,
    /// Tileable greyscale displacement field, scrolled over time.
    pub displacement_map: String,
    /// Equirectangular HDR panorama used for image-based lighting.
    pub environment: String,
    /// Per-request timeout for remote assets, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            height_map: "assets/height_map.jpeg".into(),
            displacement_map: "assets/displacement_map.jpeg".into(),
            environment:
                "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/empty_warehouse_01_1k.hdr"
                    .into(),
            request_timeout_secs: 30,
        }
    }
}
