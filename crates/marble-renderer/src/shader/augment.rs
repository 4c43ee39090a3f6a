//! Composition of the base template with injected uniforms and code.

use marble_common::ShaderAugmentationError;
use tracing::debug;

use super::template::{Slot, SlotFill, Template};
use super::uniforms::UniformBlock;

/// Name of the WGSL struct holding the merged material uniforms.
pub const MATERIAL_STRUCT: &str = "Material";
pub const CAMERA_GROUP: u32 = 0;
pub const MATERIAL_GROUP: u32 = 1;
pub const TEXTURE_GROUP: u32 = 2;
/// Locations 0 and 1 are taken by the template's own vertex outputs.
pub const FIRST_VARYING_LOCATION: u32 = 2;

/// A vertex-to-fragment pass-through value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Varying {
    pub name: String,
    pub ty: String,
    /// Expression evaluated in `vs_main`; may use `v_in` and `camera`.
    pub expr: String,
}

impl Varying {
    pub fn new(name: &str, ty: &str, expr: &str) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            expr: expr.into(),
        }
    }
}

/// A compile-time constant baked into the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderConst {
    U32(u32),
}

impl ShaderConst {
    fn declare(&self, name: &str) -> String {
        match self {
            ShaderConst::U32(v) => format!("const {name}: u32 = {v}u;\n"),
        }
    }
}

/// What to add to the base program.
#[derive(Debug, Clone, Default)]
pub struct ShaderInjection {
    pub uniforms: UniformBlock,
    /// Texture names, bound in order in group 2 with a sampler each.
    pub textures: Vec<String>,
    pub constants: Vec<(String, ShaderConst)>,
    pub varyings: Vec<Varying>,
    /// Top-level WGSL placed before `fs_main`.
    pub fragment_code: String,
    /// Replacement for the base-color region. Must assign `diffuse_color`.
    pub base_color: Option<String>,
}

/// Binding slots of one injected texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBinding {
    pub name: String,
    pub texture_binding: u32,
    pub sampler_binding: u32,
}

impl TextureBinding {
    pub fn sampler_name(&self) -> String {
        format!("{}_sampler", self.name)
    }
}

/// A composed program ready for `create_shader_module`.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub source: String,
    pub uniforms: UniformBlock,
    pub textures: Vec<TextureBinding>,
    pub constants: Vec<(String, ShaderConst)>,
}

impl ShaderProgram {
    pub fn constant(&self, name: &str) -> Option<ShaderConst> {
        self.constants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }
}

/// Compose `template` with `injection`.
///
/// Uniforms merge into `base_uniforms` (collisions overwrite), varyings
/// are declared and assigned in the vertex stage, textures, constants
/// and code go before `fs_main`, and the base-color region is replaced.
pub fn augment(
    template: &str,
    base_uniforms: &UniformBlock,
    injection: &ShaderInjection,
) -> Result<ShaderProgram, ShaderAugmentationError> {
    let parsed = Template::parse(template)?;

    let mut uniforms = base_uniforms.clone();
    uniforms.merge(&injection.uniforms);

    let textures: Vec<TextureBinding> = injection
        .textures
        .iter()
        .enumerate()
        .map(|(i, name)| TextureBinding {
            name: name.clone(),
            texture_binding: 2 * i as u32,
            sampler_binding: 2 * i as u32 + 1,
        })
        .collect();

    let mut fill = SlotFill {
        base_color: injection.base_color.clone(),
        ..Default::default()
    };

    *fill.slot_mut(Slot::Uniforms) = format!(
        "{}@group({MATERIAL_GROUP}) @binding(0) var<uniform> material: {MATERIAL_STRUCT};",
        uniforms.wgsl_struct(MATERIAL_STRUCT)
    );

    let outputs = fill.slot_mut(Slot::VertexOutput);
    for (i, varying) in injection.varyings.iter().enumerate() {
        let location = FIRST_VARYING_LOCATION + i as u32;
        outputs.push_str(&format!(
            "@location({location}) {}: {},\n",
            varying.name, varying.ty
        ));
    }

    let vertex_main = fill.slot_mut(Slot::VertexMain);
    for varying in &injection.varyings {
        vertex_main.push_str(&format!("out.{} = {};\n", varying.name, varying.expr));
    }

    let decls = fill.slot_mut(Slot::FragmentDecls);
    for binding in &textures {
        decls.push_str(&format!(
            "@group({TEXTURE_GROUP}) @binding({}) var {}: texture_2d<f32>;\n",
            binding.texture_binding, binding.name
        ));
        decls.push_str(&format!(
            "@group({TEXTURE_GROUP}) @binding({}) var {}: sampler;\n",
            binding.sampler_binding,
            binding.sampler_name()
        ));
    }
    for (name, value) in &injection.constants {
        decls.push_str(&value.declare(name));
    }
    if !injection.fragment_code.is_empty() {
        decls.push('\n');
        decls.push_str(&injection.fragment_code);
    }

    let source = parsed.render(&fill);
    debug!(
        uniforms = uniforms.len(),
        textures = textures.len(),
        varyings = injection.varyings.len(),
        bytes = source.len(),
        "shader program composed"
    );

    Ok(ShaderProgram {
        source,
        uniforms,
        textures,
        constants: injection.constants.clone(),
    })
}
