use std::sync::Arc;
use winit::window::Window;

use super::types::{PhysicalSize, RendererError};

/// Format used for offscreen (headless) rendering.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Where frames are drawn.
pub enum RenderTarget {
    /// A window surface, presented every frame.
    Surface {
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
    },
    /// An offscreen texture that can be read back.
    Offscreen { texture: wgpu::Texture },
}

/// A frame in flight: the view to draw into plus the surface texture to
/// present, if any.
pub struct Frame {
    pub view: wgpu::TextureView,
    surface_texture: Option<wgpu::SurfaceTexture>,
}

impl Frame {
    /// Present the frame. A no-op for offscreen targets.
    pub fn present(self) {
        if let Some(texture) = self.surface_texture {
            texture.present();
        }
    }
}

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub target: RenderTarget,
    pub size: PhysicalSize,
    format: wgpu::TextureFormat,
}

impl GpuContext {
    /// Initialize wgpu for a window: instance, surface, adapter, device,
    /// and an sRGB surface configuration.
    pub async fn new(window: Arc<Window>, transparent: bool) -> Result<Self, RendererError> {
        let inner_size = window.inner_size();
        let width = inner_size.width.max(1);
        let height = inner_size.height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

        let adapter = request_adapter(&instance, Some(&surface)).await?;
        let (device, queue) = request_device(&adapter).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        let alpha_mode = pick_alpha_mode(&caps.alpha_modes, transparent);
        tracing::info!(
            "Surface format: {format:?}, alpha mode: {alpha_mode:?} (available: {:?})",
            caps.formats
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            target: RenderTarget::Surface { surface, config },
            size: PhysicalSize { width, height },
            format,
        })
    }

    /// Initialize wgpu without a window, rendering into an offscreen texture.
    pub async fn headless(width: u32, height: u32) -> Result<Self, RendererError> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = request_adapter(&instance, None).await?;
        let (device, queue) = request_device(&adapter).await?;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("marble offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        Ok(Self {
            device,
            queue,
            target: RenderTarget::Offscreen { texture },
            size: PhysicalSize { width, height },
            format: OFFSCREEN_FORMAT,
        })
    }

    /// Acquire the next frame.
    ///
    /// A lost or outdated surface is reconfigured and acquired once more.
    pub fn begin_frame(&self) -> Result<Frame, RendererError> {
        match &self.target {
            RenderTarget::Surface { surface, config } => {
                let texture = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        tracing::warn!("surface lost, reconfiguring");
                        surface.configure(&self.device, config);
                        surface.get_current_texture()?
                    }
                    Err(e) => return Err(e.into()),
                };
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(Frame {
                    view,
                    surface_texture: Some(texture),
                })
            }
            RenderTarget::Offscreen { texture } => Ok(Frame {
                view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
                surface_texture: None,
            }),
        }
    }

    /// Read the offscreen target back as tightly packed RGBA8 rows.
    pub fn read_pixels(&self) -> Result<Vec<u8>, RendererError> {
        match &self.target {
            RenderTarget::Offscreen { texture } => {
                super::readback::read_texture_rgba8(&self.device, &self.queue, texture)
            }
            RenderTarget::Surface { .. } => Err(RendererError::ReadbackError(
                "window surfaces cannot be read back".into(),
            )),
        }
    }

    pub fn is_headless(&self) -> bool {
        matches!(self.target, RenderTarget::Offscreen { .. })
    }

    /// Return the render target texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Prefer a high-performance adapter, then fall back to software.
async fn request_adapter(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'static>>,
) -> Result<wgpu::Adapter, RendererError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: surface,
        })
        .await;

    let adapter = match adapter {
        Some(a) => a,
        None => {
            tracing::warn!("No hardware GPU adapter found, trying software fallback");
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    force_fallback_adapter: true,
                    compatible_surface: surface,
                })
                .await
                .ok_or(RendererError::AdapterNotFound)?
        }
    };

    let info = adapter.get_info();
    tracing::info!(
        "GPU adapter: {} ({:?}, {:?})",
        info.name,
        info.device_type,
        info.backend,
    );
    Ok(adapter)
}

async fn request_device(
    adapter: &wgpu::Adapter,
) -> Result<(wgpu::Device, wgpu::Queue), RendererError> {
    let pair = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("marble-renderer device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await?;
    Ok(pair)
}

fn pick_alpha_mode(
    available: &[wgpu::CompositeAlphaMode],
    transparent: bool,
) -> wgpu::CompositeAlphaMode {
    if transparent {
        for mode in [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ] {
            if available.contains(&mode) {
                return mode;
            }
        }
    }
    wgpu::CompositeAlphaMode::Auto
}
