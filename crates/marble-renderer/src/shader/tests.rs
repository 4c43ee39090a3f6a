use marble_common::ShaderAugmentationError;
use marble_config::schema::RenderParams;

use super::*;
use crate::volume::MarchParams;

fn params() -> MarchParams {
    MarchParams::from_config(&RenderParams::default()).unwrap()
}

fn validate_wgsl(source: &str) {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => panic!("WGSL parse failed:\n{}\n{source}", e.emit_to_string(source)),
    };
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation failed: {e:?}\n{source}");
    }
}

fn augment_err(template: &str) -> ShaderAugmentationError {
    augment(template, &base_uniforms(), &ShaderInjection::default()).unwrap_err()
}

// -- composed programs compile -----------------------------------------------

#[test]
fn marble_program_is_valid_wgsl() {
    let program = marble_program(&params()).unwrap();
    validate_wgsl(&program.source);
}

#[test]
fn base_program_without_injection_is_valid_wgsl() {
    let program = augment(STANDARD_PBR, &base_uniforms(), &ShaderInjection::default()).unwrap();
    assert!(program.source.contains("diffuse_color = material.base_color;"));
    validate_wgsl(&program.source);
}

#[test]
fn single_iteration_program_is_valid_wgsl() {
    let config = RenderParams {
        iterations: 1,
        smoothing: 0.0,
        ..Default::default()
    };
    let program = marble_program(&MarchParams::from_config(&config).unwrap()).unwrap();
    assert!(program.source.contains("const MARCH_ITERATIONS: u32 = 1u;"));
    validate_wgsl(&program.source);
}

// -- composition output ------------------------------------------------------

#[test]
fn anchors_do_not_survive_composition() {
    let program = marble_program(&params()).unwrap();
    for anchor in ["@template", "@slot:", "@begin:", "@end:"] {
        assert!(!program.source.contains(anchor), "{anchor} left in output");
    }
}

#[test]
fn header_is_dropped_wherever_it_sits() {
    let template = format!("// leading note\n{STANDARD_PBR}");
    let program = augment(&template, &base_uniforms(), &ShaderInjection::default()).unwrap();
    assert!(program.source.starts_with("// leading note\n"));
    for anchor in ["@template", "@slot:", "@begin:", "@end:"] {
        assert!(!program.source.contains(anchor), "{anchor} left in output");
    }
}

#[test]
fn base_color_region_is_replaced() {
    let program = marble_program(&params()).unwrap();
    assert!(!program.source.contains("diffuse_color = material.base_color;"));
    assert!(program.source.contains("let rgb = march_volume(ray_origin, ray_dir);"));
    assert!(program.source.contains("diffuse_color = vec4<f32>(rgb, 1.0);"));
}

#[test]
fn iteration_count_is_baked_as_constant() {
    let program = marble_program(&params()).unwrap();
    assert!(program.source.contains("const MARCH_ITERATIONS: u32 = 48u;"));
    assert_eq!(program.constant(ITERATIONS_CONST), Some(ShaderConst::U32(48)));
}

#[test]
fn varyings_are_declared_and_assigned() {
    let program = marble_program(&params()).unwrap();
    assert!(program
        .source
        .contains("@location(2) local_position: vec3<f32>,"));
    assert!(program.source.contains("@location(3) view_ray: vec3<f32>,"));
    assert!(program.source.contains("out.local_position = v_in.position;"));
    assert!(program
        .source
        .contains("out.view_ray = v_in.position - camera.camera_local.xyz;"));
}

#[test]
fn textures_bind_in_injection_order() {
    let program = marble_program(&params()).unwrap();
    let bindings: Vec<(&str, u32, u32)> = program
        .textures
        .iter()
        .map(|t| (t.name.as_str(), t.texture_binding, t.sampler_binding))
        .collect();
    assert_eq!(
        bindings,
        [("height_map", 0, 1), ("displacement_map", 2, 3)]
    );
    assert!(program
        .source
        .contains("@group(2) @binding(3) var displacement_map_sampler: sampler;"));
}

#[test]
fn roughness_collision_overwrites_base_value() {
    let program = marble_program(&params()).unwrap();
    assert_eq!(
        program.uniforms.get("roughness"),
        Some(UniformValue::F32(0.1))
    );
    let count = program.uniforms.names().filter(|n| *n == "roughness").count();
    assert_eq!(count, 1);
    assert_eq!(program.source.matches("    roughness: f32,").count(), 1);
}

#[test]
fn material_layout_is_stable() {
    let program = marble_program(&params()).unwrap();
    let u = &program.uniforms;
    assert_eq!(u.offset_of("base_color"), Some(0));
    assert_eq!(u.offset_of("roughness"), Some(16));
    assert_eq!(u.offset_of("color_a"), Some(48));
    assert_eq!(u.offset_of("color_b"), Some(64));
    assert_eq!(u.offset_of("depth"), Some(76));
    assert_eq!(u.offset_of("smoothing"), Some(80));
    assert_eq!(u.offset_of("displacement"), Some(84));
    assert_eq!(u.offset_of("time"), Some(88));
    assert_eq!(u.byte_size(), 96);
    assert_eq!(u.to_bytes().len(), 96);
}

#[test]
fn composition_is_deterministic() {
    let a = marble_program(&params()).unwrap();
    let b = marble_program(&params()).unwrap();
    assert_eq!(a.source, b.source);
}

#[test]
fn slot_text_takes_anchor_indentation() {
    let program = marble_program(&params()).unwrap();
    assert!(program
        .source
        .contains("    out.local_position = v_in.position;\n"));
}

// -- malformed templates -----------------------------------------------------

#[test]
fn missing_slot_is_reported() {
    let broken = STANDARD_PBR.replace("// @slot:vertex_main", "");
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::MissingAnchor("@slot:vertex_main".into())
    );
}

#[test]
fn duplicate_slot_is_reported() {
    let broken = STANDARD_PBR.replace(
        "// @slot:uniforms",
        "// @slot:uniforms\n// @slot:uniforms",
    );
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::DuplicateAnchor("@slot:uniforms".into())
    );
}

#[test]
fn missing_region_begin_is_reported() {
    let broken = STANDARD_PBR.replace("// @begin:base_color", "");
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::MissingAnchor("@begin:base_color".into())
    );
}

#[test]
fn unterminated_region_is_reported() {
    let broken = STANDARD_PBR.replace("// @end:base_color", "");
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::UnterminatedRegion("base_color".into())
    );
}

#[test]
fn region_end_before_begin_is_unterminated() {
    let broken = STANDARD_PBR
        .replace("// @end:base_color", "")
        .replace("// @slot:fragment_decls", "// @slot:fragment_decls\n// @end:base_color");
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::UnterminatedRegion("base_color".into())
    );
}

#[test]
fn missing_header_is_reported() {
    let broken = STANDARD_PBR.replace("// @template:standard-pbr v1", "// plain shader");
    assert_eq!(
        augment_err(&broken),
        ShaderAugmentationError::MissingAnchor("@template".into())
    );
}

#[test]
fn version_mismatch_is_reported() {
    let broken = STANDARD_PBR.replace("standard-pbr v1", "standard-pbr v2");
    match augment_err(&broken) {
        ShaderAugmentationError::VersionMismatch { expected, found } => {
            assert_eq!(expected, "standard-pbr v1");
            assert_eq!(found, "standard-pbr v2");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn template_parse_accepts_shipped_template() {
    assert!(Template::parse(STANDARD_PBR).is_ok());
}
