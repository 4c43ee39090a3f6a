//! Rendering surface configuration.

use serde::{Deserialize, Serialize};

/// Rendering surface settings.
///
/// The surface has a fixed logical size; the host window is not resizable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Clear to transparent and request a transparent window.
    pub transparent: bool,
    /// Where the surface is attached: `"window"` or `"png:<path>"`.
    ///
    /// Anything that cannot be resolved falls back to `"window"`.
    pub mount: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Marble".into(),
            width: 200,
            height: 200,
            transparent: true,
            mount: "window".into(),
        }
    }
}
