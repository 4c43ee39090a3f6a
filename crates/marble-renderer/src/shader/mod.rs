//! Shader composition.
//!
//! The base program is a versioned WGSL template with named anchors;
//! [`augment`] fills them with an injection. Composition runs once per
//! program build, never per frame.

mod augment;
mod marble;
mod template;
mod uniforms;

#[cfg(test)]
mod tests;

pub use augment::{
    augment, ShaderConst, ShaderInjection, ShaderProgram, TextureBinding, Varying, CAMERA_GROUP,
    FIRST_VARYING_LOCATION, MATERIAL_GROUP, MATERIAL_STRUCT, TEXTURE_GROUP,
};
pub use marble::{marble_injection, marble_program, marble_uniforms, ITERATIONS_CONST, MARBLE_MARCH};
pub use template::{base_uniforms, Slot, Template, BASE_COLOR_REGION, STANDARD_PBR};
pub use uniforms::{FieldLayout, UniformBlock, UniformValue};
