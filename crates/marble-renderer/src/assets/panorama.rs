use glam::Vec3;

/// Equirectangular HDR image, row 0 at the top (+Y).
#[derive(Debug, Clone)]
pub struct RawPanorama {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

impl RawPanorama {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }
}
