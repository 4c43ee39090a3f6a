//! Named, ordered uniform blocks with WGSL uniform-buffer layout.

/// One uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    pub fn wgsl_type(&self) -> &'static str {
        match self {
            UniformValue::F32(_) => "f32",
            UniformValue::Vec3(_) => "vec3<f32>",
            UniformValue::Vec4(_) => "vec4<f32>",
        }
    }

    /// Alignment in the uniform address space.
    pub fn align(&self) -> usize {
        match self {
            UniformValue::F32(_) => 4,
            UniformValue::Vec3(_) | UniformValue::Vec4(_) => 16,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            UniformValue::F32(_) => 4,
            UniformValue::Vec3(_) => 12,
            UniformValue::Vec4(_) => 16,
        }
    }

    fn write(&self, out: &mut [u8]) {
        match self {
            UniformValue::F32(v) => out.copy_from_slice(bytemuck::bytes_of(v)),
            UniformValue::Vec3(v) => out.copy_from_slice(bytemuck::cast_slice(v)),
            UniformValue::Vec4(v) => out.copy_from_slice(bytemuck::cast_slice(v)),
        }
    }
}

/// Byte placement of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub offset: usize,
    pub size: usize,
}

/// An ordered set of named uniforms that becomes one WGSL struct.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    fields: Vec<(String, UniformValue)>,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: UniformValue) -> Self {
        self.set(name, value);
        self
    }

    /// Overwrite `name` in place if present, otherwise append it.
    pub fn set(&mut self, name: &str, value: UniformValue) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Merge `other` into `self`: collisions overwrite, the rest append
    /// in `other`'s order.
    pub fn merge(&mut self, other: &UniformBlock) {
        for (name, value) in &other.fields {
            self.set(name, *value);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field offsets following WGSL uniform layout rules.
    pub fn layout(&self) -> Vec<FieldLayout> {
        let mut offset = 0usize;
        self.fields
            .iter()
            .map(|(name, value)| {
                offset = offset.next_multiple_of(value.align());
                let field = FieldLayout {
                    name: name.clone(),
                    offset,
                    size: value.size(),
                };
                offset += value.size();
                field
            })
            .collect()
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.layout()
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.offset)
    }

    /// Buffer size, rounded up to 16 bytes.
    pub fn byte_size(&self) -> usize {
        let end = self
            .layout()
            .last()
            .map(|f| f.offset + f.size)
            .unwrap_or(0);
        end.next_multiple_of(16).max(16)
    }

    /// Pack all values into a buffer image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.byte_size()];
        for (field, (_, value)) in self.layout().iter().zip(&self.fields) {
            value.write(&mut bytes[field.offset..field.offset + field.size]);
        }
        bytes
    }

    /// WGSL struct declaration for this block.
    pub fn wgsl_struct(&self, struct_name: &str) -> String {
        let mut out = format!("struct {struct_name} {{\n");
        for (name, value) in &self.fields {
            out.push_str(&format!("    {name}: {},\n", value.wgsl_type()));
        }
        out.push_str("};\n");
        out
    }
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_collisions_in_place() {
        let mut base = UniformBlock::new()
            .with("base_color", UniformValue::Vec4([1.0; 4]))
            .with("roughness", UniformValue::F32(1.0))
            .with("metalness", UniformValue::F32(0.0));
        let extra = UniformBlock::new()
            .with("roughness", UniformValue::F32(0.1))
            .with("time", UniformValue::F32(0.0));
        base.merge(&extra);

        let names: Vec<&str> = base.names().collect();
        assert_eq!(names, ["base_color", "roughness", "metalness", "time"]);
        assert_eq!(base.get("roughness"), Some(UniformValue::F32(0.1)));
    }

    #[test]
    fn vec3_aligns_to_16_and_f32_packs_into_tail() {
        let block = UniformBlock::new()
            .with("a", UniformValue::F32(1.0))
            .with("color", UniformValue::Vec3([0.0, 1.0, 0.5]))
            .with("depth", UniformValue::F32(0.6));
        let layout = block.layout();
        assert_eq!(layout[0].offset, 0);
        assert_eq!(layout[1].offset, 16);
        assert_eq!(layout[2].offset, 28);
        assert_eq!(block.byte_size(), 32);
    }

    #[test]
    fn to_bytes_places_values_at_offsets() {
        let block = UniformBlock::new()
            .with("n", UniformValue::F32(7.0))
            .with("v", UniformValue::Vec4([1.0, 2.0, 3.0, 4.0]));
        let bytes = block.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..4], &7.0f32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[28..32], &4.0f32.to_ne_bytes());
    }

    #[test]
    fn empty_block_still_has_minimum_size() {
        assert_eq!(UniformBlock::new().byte_size(), 16);
    }

    #[test]
    fn wgsl_struct_lists_fields_in_order() {
        let block = UniformBlock::new()
            .with("time", UniformValue::F32(0.0))
            .with("tint", UniformValue::Vec3([0.0; 3]));
        assert_eq!(
            block.wgsl_struct("Material"),
            "struct Material {\n    time: f32,\n    tint: vec3<f32>,\n};\n"
        );
    }

    #[test]
    fn offset_of_finds_field() {
        let block = UniformBlock::new()
            .with("base_color", UniformValue::Vec4([0.0; 4]))
            .with("time", UniformValue::F32(0.0));
        assert_eq!(block.offset_of("time"), Some(16));
        assert_eq!(block.offset_of("missing"), None);
    }
}
