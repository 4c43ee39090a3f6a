//! Offscreen texture readback into tightly packed RGBA8 rows.

use super::types::RendererError;

/// Round a row of `width` RGBA8 texels up to the copy row alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let tight = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    tight.div_ceil(align) * align
}

/// Copy an RGBA8 texture into a staging buffer, wait for the map, and
/// strip the row padding.
pub fn read_texture_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<Vec<u8>, RendererError> {
    let width = texture.width();
    let height = texture.height();
    if !matches!(
        texture.format(),
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb
    ) {
        return Err(RendererError::ReadbackError(format!(
            "unsupported readback format {:?}",
            texture.format()
        )));
    }

    let tight_bpr = (width * 4) as usize;
    let padded_bpr = padded_bytes_per_row(width);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("marble readback staging"),
        size: u64::from(padded_bpr) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("marble readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bpr),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);

    rx.recv()
        .map_err(|_| RendererError::ReadbackError("map callback dropped".into()))?
        .map_err(|e| RendererError::ReadbackError(e.to_string()))?;

    let data = slice.get_mapped_range();
    let mut tight = vec![0u8; tight_bpr * height as usize];
    for (row, chunk) in tight.chunks_exact_mut(tight_bpr).enumerate() {
        let start = row * padded_bpr as usize;
        chunk.copy_from_slice(&data[start..start + tight_bpr]);
    }
    drop(data);
    staging.unmap();

    Ok(tight)
}
