//! CPU reference of the marble raymarch.
//!
//! Mirrors `march_volume` in `shaders/marble_march.wgsl` operation for
//! operation, so its properties can be checked without a GPU.

mod field;
mod march;
mod params;


pub use field::{FieldSampler, GridField};
pub use march::{displace_point, equirect_uv, march_occupancy, march_volume, soft_threshold};
pub use params::MarchParams;
