//! Versioned WGSL template with named insertion anchors.

use marble_common::ShaderAugmentationError;

use super::uniforms::{UniformBlock, UniformValue};

pub const TEMPLATE_NAME: &str = "standard-pbr";
pub const TEMPLATE_VERSION: u32 = 1;

/// The physically-based base program.
pub const STANDARD_PBR: &str = include_str!("../shaders/standard_pbr.wgsl");

const HEADER_PREFIX: &str = "// @template:";
const SLOT_PREFIX: &str = "// @slot:";
const REGION_BEGIN: &str = "// @begin:";
const REGION_END: &str = "// @end:";

/// Insertion points a template must declare exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Uniforms,
    VertexOutput,
    VertexMain,
    FragmentDecls,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::Uniforms,
        Slot::VertexOutput,
        Slot::VertexMain,
        Slot::FragmentDecls,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Uniforms => "uniforms",
            Slot::VertexOutput => "vertex_output",
            Slot::VertexMain => "vertex_main",
            Slot::FragmentDecls => "fragment_decls",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Name of the replaceable base-color region.
pub const BASE_COLOR_REGION: &str = "base_color";

/// Material uniforms the template's own code reads.
pub fn base_uniforms() -> UniformBlock {
    UniformBlock::new()
        .with("base_color", UniformValue::Vec4([1.0, 1.0, 1.0, 1.0]))
        .with("roughness", UniformValue::F32(1.0))
        .with("metalness", UniformValue::F32(0.0))
        .with("env_intensity", UniformValue::F32(1.0))
        .with("exposure", UniformValue::F32(1.0))
        .with("env_max_lod", UniformValue::F32(0.0))
}

/// A parsed template: source lines plus where each anchor sits.
#[derive(Debug)]
pub struct Template<'a> {
    lines: Vec<&'a str>,
    header: usize,
    slots: [usize; 4],
    region: (usize, usize),
}

/// Text to put at each anchor. `None` for the region keeps its body.
#[derive(Debug, Default)]
pub struct SlotFill {
    pub slots: [String; 4],
    pub base_color: Option<String>,
}

impl SlotFill {
    pub fn slot_mut(&mut self, slot: Slot) -> &mut String {
        &mut self.slots[slot.index()]
    }
}

impl<'a> Template<'a> {
    /// Locate and check every anchor.
    pub fn parse(source: &'a str) -> Result<Self, ShaderAugmentationError> {
        let lines: Vec<&str> = source.lines().collect();
        let header = check_header(&lines)?;

        let mut slots = [0usize; 4];
        for slot in Slot::ALL {
            let marker = format!("{SLOT_PREFIX}{}", slot.name());
            slots[slot.index()] = find_unique(&lines, &marker)?;
        }

        let begin = find_unique(&lines, &format!("{REGION_BEGIN}{BASE_COLOR_REGION}"))?;
        let end_marker = format!("{REGION_END}{BASE_COLOR_REGION}");
        let ends: Vec<usize> = positions(&lines, &end_marker);
        let end = match ends.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => return Err(ShaderAugmentationError::DuplicateAnchor(anchor_name(&end_marker))),
        };
        let end = end
            .filter(|&e| e > begin)
            .ok_or_else(|| ShaderAugmentationError::UnterminatedRegion(BASE_COLOR_REGION.into()))?;

        if slots.iter().any(|&s| s > begin && s < end) {
            return Err(ShaderAugmentationError::UnterminatedRegion(
                BASE_COLOR_REGION.into(),
            ));
        }

        Ok(Self {
            lines,
            header,
            slots,
            region: (begin, end),
        })
    }

    /// Splice `fill` into the template. Anchor lines are dropped.
    pub fn render(&self, fill: &SlotFill) -> String {
        let mut out = String::new();
        let mut idx = 0;
        while idx < self.lines.len() {
            let line = self.lines[idx];

            if idx == self.header {
                idx += 1;
                continue;
            }

            if let Some(slot) = Slot::ALL.iter().find(|s| self.slots[s.index()] == idx) {
                push_indented(&mut out, indent_of(line), &fill.slots[slot.index()]);
                idx += 1;
                continue;
            }

            if idx == self.region.0 {
                match &fill.base_color {
                    Some(body) => push_indented(&mut out, indent_of(line), body),
                    None => {
                        for kept in &self.lines[self.region.0 + 1..self.region.1] {
                            out.push_str(kept);
                            out.push('\n');
                        }
                    }
                }
                idx = self.region.1 + 1;
                continue;
            }

            out.push_str(line);
            out.push('\n');
            idx += 1;
        }
        out
    }
}

/// Returns the line index of the single `@template` header.
fn check_header(lines: &[&str]) -> Result<usize, ShaderAugmentationError> {
    let headers: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.trim().strip_prefix(HEADER_PREFIX).map(|rest| (i, rest)))
        .collect();
    let (index, found) = match headers.as_slice() {
        [] => {
            return Err(ShaderAugmentationError::MissingAnchor(
                "@template".into(),
            ))
        }
        [(index, rest)] => (*index, rest.trim()),
        _ => {
            return Err(ShaderAugmentationError::DuplicateAnchor(
                "@template".into(),
            ))
        }
    };

    let expected = format!("{TEMPLATE_NAME} v{TEMPLATE_VERSION}");
    if found != expected {
        return Err(ShaderAugmentationError::VersionMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(index)
}

fn positions(lines: &[&str], marker: &str) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.trim() == marker)
        .map(|(i, _)| i)
        .collect()
}

fn find_unique(lines: &[&str], marker: &str) -> Result<usize, ShaderAugmentationError> {
    match positions(lines, marker).as_slice() {
        [] => Err(ShaderAugmentationError::MissingAnchor(anchor_name(marker))),
        [only] => Ok(*only),
        _ => Err(ShaderAugmentationError::DuplicateAnchor(anchor_name(marker))),
    }
}

fn anchor_name(marker: &str) -> String {
    marker.trim_start_matches("// ").to_string()
}

fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn push_indented(out: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(indent);
        }
        out.push_str(line);
        out.push('\n');
    }
}
