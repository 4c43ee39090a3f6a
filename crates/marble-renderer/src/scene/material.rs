use wgpu::util::DeviceExt;

use crate::shader::{UniformBlock, UniformValue};

const TIME_FIELD: &str = "time";

/// The material uniform block and the GPU buffer mirroring it.
pub struct MaterialBuffer {
    block: UniformBlock,
    pub buffer: wgpu::Buffer,
    time_offset: Option<u64>,
}

impl MaterialBuffer {
    pub fn new(device: &wgpu::Device, block: UniformBlock) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material uniforms"),
            contents: &block.to_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let time_offset = block.offset_of(TIME_FIELD).map(|o| o as u64);
        Self {
            block,
            buffer,
            time_offset,
        }
    }

    pub fn size(&self) -> u64 {
        self.block.byte_size() as u64
    }

    /// Write only the `time` field.
    pub fn write_time(&mut self, queue: &wgpu::Queue, time: f32) {
        let Some(offset) = self.time_offset else {
            return;
        };
        self.block.set(TIME_FIELD, UniformValue::F32(time));
        queue.write_buffer(&self.buffer, offset, bytemuck::bytes_of(&time));
    }

    /// Overwrite values in place and upload the whole block.
    ///
    /// `values` may only contain fields already in the block; the buffer
    /// layout is fixed once created.
    pub fn update(&mut self, queue: &wgpu::Queue, values: &UniformBlock) {
        for name in values.names() {
            if let Some(value) = values.get(name) {
                if self.block.get(name).is_some() {
                    self.block.set(name, value);
                } else {
                    tracing::warn!(field = name, "ignoring unknown material uniform");
                }
            }
        }
        queue.write_buffer(&self.buffer, 0, &self.block.to_bytes());
    }
}
