use glam::Mat4;
use marble_common::MarbleError;
use marble_config::schema::{MarbleConfig, RenderParams};
use tracing::{debug, info};

use super::init::LoadedAssets;
use super::material::MaterialBuffer;
use crate::animation::{AnimationDriver, FrameLoop};
use crate::assets::GpuTexture;
use crate::camera::{CameraUniforms, OrbitController, PerspectiveCamera};
use crate::environment::Probe;
use crate::gpu::{GpuContext, RendererError};
use crate::shader::{marble_program, marble_uniforms, ShaderProgram, UniformValue};
use crate::sphere::{
    camera_layout, create_render_pipeline, material_layout, texture_layout, SphereLod, SphereMesh,
};
use crate::volume::MarchParams;

struct BindLayouts {
    camera: wgpu::BindGroupLayout,
    material: wgpu::BindGroupLayout,
    textures: wgpu::BindGroupLayout,
}

impl BindLayouts {
    fn as_slice(&self) -> [&wgpu::BindGroupLayout; 3] {
        [&self.camera, &self.material, &self.textures]
    }
}

/// The marble sphere with all of its GPU state.
///
/// Owns the frame loop: it starts when the scene is built and is cancelled
/// by [`close`](Self::close) or on drop.
pub struct MarbleScene {
    params: MarchParams,
    program: ShaderProgram,
    pipeline: wgpu::RenderPipeline,
    layouts: BindLayouts,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    material: MaterialBuffer,
    material_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    _textures: Vec<(String, GpuTexture)>,
    _probe: Probe,
    mesh: SphereMesh,
    camera: PerspectiveCamera,
    orbit: OrbitController,
    driver: AnimationDriver,
    frame_loop: FrameLoop,
    model: Mat4,
    clear_color: wgpu::Color,
}

impl MarbleScene {
    /// Upload assets, compose and compile the marble program, and start the
    /// frame loop.
    pub async fn new(
        gpu: &GpuContext,
        assets: LoadedAssets,
        config: &MarbleConfig,
    ) -> Result<Self, MarbleError> {
        let params = MarchParams::from_config(&config.render)?;
        let program = marble_program(&params)?;
        let device = &gpu.device;

        let textures: Vec<(String, GpuTexture)> = [&assets.height_map, &assets.displacement_map]
            .into_iter()
            .map(|data| {
                (
                    data.role.binding_name().to_string(),
                    GpuTexture::upload(device, &gpu.queue, data),
                )
            })
            .collect();
        let probe = Probe::upload(device, &gpu.queue, &assets.probe);

        let mut uniforms = program.uniforms.clone();
        uniforms.set("env_max_lod", UniformValue::F32(probe.max_lod()));
        let material = MaterialBuffer::new(device, uniforms);

        let layouts = BindLayouts {
            camera: camera_layout(device, std::mem::size_of::<CameraUniforms>() as u64),
            material: material_layout(device, material.size()),
            textures: texture_layout(device, program.textures.len() as u32),
        };

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &layouts.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material bind group"),
            layout: &layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&probe.diffuse_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&probe.specular_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&probe.sampler),
                },
            ],
        });

        let mut texture_entries = Vec::with_capacity(program.textures.len() * 2);
        for binding in &program.textures {
            let (_, texture) = textures
                .iter()
                .find(|(name, _)| *name == binding.name)
                .ok_or_else(|| {
                    MarbleError::Renderer(format!("no texture loaded for `{}`", binding.name))
                })?;
            texture_entries.push(wgpu::BindGroupEntry {
                binding: binding.texture_binding,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
            texture_entries.push(wgpu::BindGroupEntry {
                binding: binding.sampler_binding,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            });
        }
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("marble texture bind group"),
            layout: &layouts.textures,
            entries: &texture_entries,
        });

        let pipeline =
            create_render_pipeline(device, &program.source, &layouts.as_slice(), gpu.format())
                .await?;

        let aspect = gpu.size.width as f32 / gpu.size.height.max(1) as f32;
        let camera = PerspectiveCamera::from_config(&config.camera, aspect);
        let orbit = OrbitController::new(&config.camera);
        let driver = AnimationDriver::new(params.speed);
        let clear_color = if config.window.transparent {
            wgpu::Color::TRANSPARENT
        } else {
            wgpu::Color::BLACK
        };

        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        info!(
            iterations = params.iterations.get(),
            width = gpu.size.width,
            height = gpu.size.height,
            "marble scene ready"
        );

        Ok(Self {
            params,
            program,
            pipeline,
            layouts,
            camera_buffer,
            camera_bind_group,
            material,
            material_bind_group,
            texture_bind_group,
            _textures: textures,
            _probe: probe,
            mesh: SphereMesh::new(device, SphereLod::default()),
            camera,
            orbit,
            driver,
            frame_loop,
            model: Mat4::IDENTITY,
            clear_color,
        })
    }

    /// Advance time by `delta_secs`, move the camera, and draw one frame.
    ///
    /// Does nothing once the frame loop has been cancelled.
    pub fn frame(&mut self, gpu: &GpuContext, delta_secs: f32) -> Result<(), RendererError> {
        if !self.frame_loop.is_running() {
            return Ok(());
        }

        let time = self.driver.advance(delta_secs);
        self.orbit.update(&mut self.camera, delta_secs);
        let camera = self.camera.uniforms(self.model);
        gpu.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera));
        self.material.write_time(&gpu.queue, time);

        let frame = gpu.begin_frame()?;
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("marble frame encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("marble pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_bind_group(1, &self.material_bind_group, &[]);
            pass.set_bind_group(2, &self.texture_bind_group, &[]);
            self.mesh.draw(&mut pass);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        if self.frame_loop.frames() == 0 {
            info!(
                "First frame presented ({}x{}, format={:?})",
                gpu.size.width,
                gpu.size.height,
                gpu.format()
            );
        }
        self.frame_loop.record_frame();
        Ok(())
    }

    /// Re-apply `[render]` settings.
    ///
    /// Uniform-only changes are written in place. A different iteration
    /// count recomposes the program and rebuilds the pipeline; on failure
    /// the running pipeline is kept.
    pub async fn apply_params(
        &mut self,
        gpu: &GpuContext,
        render: &RenderParams,
    ) -> Result<(), MarbleError> {
        let params = MarchParams::from_config(render)?;
        if params == self.params {
            return Ok(());
        }

        if params.iterations != self.params.iterations {
            let program = marble_program(&params)?;
            let pipeline = create_render_pipeline(
                &gpu.device,
                &program.source,
                &self.layouts.as_slice(),
                gpu.format(),
            )
            .await?;
            info!(
                from = self.params.iterations.get(),
                to = params.iterations.get(),
                "marble program rebuilt"
            );
            self.program = program;
            self.pipeline = pipeline;
        }

        self.material
            .update(&gpu.queue, &marble_uniforms(&params, self.driver.time()));
        self.driver.set_speed(params.speed);
        debug!(?params, "render params applied");
        self.params = params;
        Ok(())
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn params(&self) -> &MarchParams {
        &self.params
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn time(&self) -> f32 {
        self.driver.time()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    /// Stop drawing. The scene keeps its resources until dropped.
    pub fn close(&mut self) {
        self.frame_loop.cancel();
    }
}

impl Drop for MarbleScene {
    fn drop(&mut self) {
        self.frame_loop.cancel();
    }
}
