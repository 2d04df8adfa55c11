//! wgpu renderer for the tunnel scene, shared by the web and native frontends.

use tunnel_core::{
    FrameRenderer, GeometryId, MaterialId, RenderContext, ResourceRelease, TunnelScene, Viewport,
};
use wgpu::util::DeviceExt;

pub mod layout;
mod pipeline;

use layout::{pack_instances, InstanceData, SceneUniforms};
use pipeline::{create_line_resources, LineResources};

// Shaders bundled as string constants
pub static TUNNEL_WGSL: &str = include_str!("../shaders/tunnel.wgsl");

const INITIAL_INSTANCE_CAPACITY: usize = 128;

struct Mesh {
    buffer: wgpu::Buffer,
    label: &'static str,
}

pub struct TunnelRenderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    lines: LineResources,
    // [section][geometry]; `None` once released
    meshes: Vec<Vec<Option<Mesh>>>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<InstanceData>,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'a> TunnelRenderer<'a> {
    /// Acquire a device for `target`, configure it at `ctx.viewport` and
    /// upload every section's geometry once.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        ctx: &RenderContext,
    ) -> anyhow::Result<Self> {
        let Viewport { width, height } = ctx.viewport;

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Hex colors are already display-encoded, so prefer a non-sRGB target
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let lines = create_line_resources(&device, format);
        let meshes = upload_meshes(&device, &ctx.scene);
        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        if let Some(material) = ctx.scene.sections.first().map(|s| s.material(MaterialId(0))) {
            if (material.line_width - 1.0).abs() > f32::EPSILON {
                log::debug!(
                    "line width {} requested; WebGPU rasterizes 1px lines",
                    material.line_width
                );
            }
        }
        let [r, g, b] = ctx.scene.background.to_rgb();
        log::info!("renderer ready: {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            lines,
            meshes,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            instances: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            width,
            height,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }
        if viewport.width != self.width || viewport.height != self.height {
            self.width = viewport.width;
            self.height = viewport.height;
            self.config.width = viewport.width;
            self.config.height = viewport.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn draw(&mut self, ctx: &RenderContext) -> Result<(), wgpu::SurfaceError> {
        let draws = pack_instances(&ctx.scene, &mut self.instances);
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances),
        );
        self.queue.write_buffer(
            &self.lines.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_context(ctx)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tunnel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            rpass.set_bind_group(0, &self.lines.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for d in &draws {
                let Some(mesh) = self
                    .meshes
                    .get(d.section)
                    .and_then(|m| m.get(d.geometry.0))
                    .and_then(Option::as_ref)
                else {
                    continue;
                };
                rpass.set_pipeline(self.lines.pipeline(d.topology));
                rpass.set_vertex_buffer(0, mesh.buffer.slice(..));
                rpass.draw(0..d.vertex_count, d.instances.clone());
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FrameRenderer for TunnelRenderer<'_> {
    fn render(&mut self, ctx: &RenderContext) {
        match self.draw(ctx) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
            }
            Err(wgpu::SurfaceError::Timeout) => log::warn!("surface timeout, frame skipped"),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

impl ResourceRelease for TunnelRenderer<'_> {
    fn release_geometry(&mut self, section: usize, geometry: GeometryId) {
        let mesh = self
            .meshes
            .get_mut(section)
            .and_then(|m| m.get_mut(geometry.0))
            .and_then(Option::take);
        if let Some(mesh) = mesh {
            log::debug!("releasing {} of section {}", mesh.label, section);
            mesh.buffer.destroy();
        }
    }

    fn release_material(&mut self, section: usize, material: MaterialId) {
        // Materials live in the per-frame instance stream; nothing to free.
        log::trace!("material {} of section {} released", material.0, section);
    }
}

fn upload_meshes(device: &wgpu::Device, scene: &TunnelScene) -> Vec<Vec<Option<Mesh>>> {
    scene
        .sections
        .iter()
        .map(|section| {
            section
                .geometries
                .iter()
                .map(|g| {
                    Some(Mesh {
                        buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(g.label),
                            contents: bytemuck::cast_slice(&g.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        }),
                        label: g.label,
                    })
                })
                .collect()
        })
        .collect()
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceData>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
