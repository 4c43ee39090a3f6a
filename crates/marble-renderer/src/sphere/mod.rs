//! Unit sphere geometry and the render pipeline that draws it.

mod mesh;
mod pipeline;
mod types;

pub use mesh::*;
pub use pipeline::*;
pub use types::*;
