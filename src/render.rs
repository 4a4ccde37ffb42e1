use fnv::FnvHashMap;
use viewer_core::{Material, MeshId, NodeId, Scene, Texture, TextureId, Viewer};
use wgpu::util::DeviceExt;
use web_sys as web;

mod helpers;
mod mesh;
mod pipeline;
mod texture;

use mesh::GpuMesh;
use pipeline::{create_scene_pipeline, DrawUniforms, GlobalsUniforms, ScenePipeline};
use texture::GpuTexture;

/// Per-node uniforms and the bind group pairing them with a color texture.
struct DrawSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Option<TextureId>,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,

    scene_pipeline: ScenePipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    // `None` marks geometry that has nothing to draw
    meshes: FnvHashMap<MeshId, Option<GpuMesh>>,
    textures: FnvHashMap<TextureId, GpuTexture>,
    white: GpuTexture,
    draws: FnvHashMap<NodeId, DrawSlot>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
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
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let scene_pipeline = create_scene_pipeline(&device, format);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniforms"),
            size: std::mem::size_of::<GlobalsUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &scene_pipeline.globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let white = GpuTexture::upload(&device, &queue, &Texture::solid([255, 255, 255, 255]));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            _depth_tex: depth_tex,
            scene_pipeline,
            globals_buffer,
            globals_bind_group,
            meshes: FnvHashMap::default(),
            textures: FnvHashMap::default(),
            white,
            draws: FnvHashMap::default(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self._depth_tex = tex;
            self.depth_view = view;
        }
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn ensure_mesh(&mut self, scene: &Scene, id: MeshId) -> bool {
        let device = &self.device;
        self.meshes
            .entry(id)
            .or_insert_with(|| scene.geometry(id).and_then(|g| GpuMesh::upload(device, g)))
            .is_some()
    }

    /// Uploads `id` on first use. `None` if the scene no longer holds it.
    fn ensure_texture(&mut self, scene: &Scene, id: TextureId) -> Option<TextureId> {
        if !self.textures.contains_key(&id) {
            let texture = scene.texture(id)?;
            log::info!(
                "[gpu] upload texture {}x{} {}",
                texture.width,
                texture.height,
                texture.source.as_deref().unwrap_or("")
            );
            let gpu = GpuTexture::upload(&self.device, &self.queue, texture);
            self.textures.insert(id, gpu);
        }
        Some(id)
    }

    fn write_draw(&mut self, node: NodeId, texture: Option<TextureId>, uniforms: &DrawUniforms) {
        let stale = self
            .draws
            .get(&node)
            .map_or(true, |slot| slot.texture != texture);
        if stale {
            let buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("draw_uniforms"),
                    contents: bytemuck::bytes_of(uniforms),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
            let tex = texture
                .and_then(|id| self.textures.get(&id))
                .unwrap_or(&self.white);
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("draw_bg"),
                layout: &self.scene_pipeline.draw_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&tex.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&tex.sampler),
                    },
                ],
            });
            self.draws.insert(
                node,
                DrawSlot {
                    buffer,
                    bind_group,
                    texture,
                },
            );
        } else if let Some(slot) = self.draws.get(&node) {
            self.queue
                .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(uniforms));
        }
    }

    /// Collect visible mesh nodes, refreshing their uniforms.
    fn prepare(&mut self, scene: &Scene) -> Vec<(NodeId, MeshId)> {
        // textures replaced by the basemap are gone from the scene
        self.textures.retain(|id, _| scene.texture(*id).is_some());

        let mut batch = Vec::new();
        for world_node in scene.world_nodes() {
            if !world_node.visible {
                continue;
            }
            let Some(node) = scene.node(world_node.id) else {
                continue;
            };
            let (Some(mesh), Some(material)) = (node.mesh, node.material.as_ref()) else {
                continue;
            };
            if !self.ensure_mesh(scene, mesh) {
                continue;
            }
            let texture = material
                .texture()
                .and_then(|id| self.ensure_texture(scene, id));
            let uniforms = draw_uniforms(scene, world_node.world, material, texture);
            self.write_draw(world_node.id, texture, &uniforms);
            batch.push((world_node.id, mesh));
        }
        batch
    }

    pub fn render(&mut self, viewer: &Viewer) -> Result<(), wgpu::SurfaceError> {
        let scene = viewer.scene();
        let globals = GlobalsUniforms::new(viewer.camera(), viewer.lighting().settings());
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        let batch = self.prepare(scene);

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
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(helpers::clear_color(viewer.background())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene_pipeline.pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (node, mesh) in &batch {
                let (Some(slot), Some(Some(gpu_mesh))) = (self.draws.get(node), self.meshes.get(mesh))
                else {
                    continue;
                };
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn draw_uniforms(
    scene: &Scene,
    world: glam::Mat4,
    material: &Material,
    texture: Option<TextureId>,
) -> DrawUniforms {
    let repeat = texture
        .and_then(|id| scene.texture(id))
        .map_or([1.0, 1.0], |t| t.repeat.to_array());
    DrawUniforms::new(world, material, repeat, texture.is_some())
}
