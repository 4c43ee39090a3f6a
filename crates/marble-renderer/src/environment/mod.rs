//! Environment prefilter: turns an equirectangular HDR panorama into a
//! light probe (diffuse irradiance cube + GGX specular mip chain).

mod prefilter;
mod probe;
mod sampling;

pub use prefilter::{prefilter, CubeFaces, PrefilterSettings, ProbeMaps};
pub use probe::Probe;
