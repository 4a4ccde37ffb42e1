use super::helpers::{srgb_to_linear, DEPTH_FORMAT};
use super::mesh::Vertex;
use glam::{Mat4, Vec3};
use viewer_core::{LightSettings, Material, PerspectiveCamera};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) camera_pos: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) sun_dir: [f32; 4],
    pub(crate) sun_color: [f32; 4],
    pub(crate) sky_color: [f32; 4],
    pub(crate) ground_color: [f32; 4],
    pub(crate) hemi_up: [f32; 4],
}

#[inline]
fn rgb4(color: Vec3, intensity: f32) -> [f32; 4] {
    (srgb_to_linear(color) * intensity).extend(1.0).to_array()
}

impl GlobalsUniforms {
    pub(crate) fn new(camera: &PerspectiveCamera, lights: &LightSettings) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: rgb4(lights.ambient.color, lights.ambient.intensity),
            sun_dir: lights.directional.direction().extend(0.0).to_array(),
            sun_color: rgb4(lights.directional.color, lights.directional.intensity),
            sky_color: rgb4(lights.hemisphere.sky_color, lights.hemisphere.intensity),
            ground_color: rgb4(lights.hemisphere.ground_color, lights.hemisphere.intensity),
            hemi_up: lights.hemisphere.up().extend(0.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal: [[f32; 4]; 4],
    pub(crate) base_color: [f32; 4],
    pub(crate) emissive: [f32; 4],
    // xy: uv repeat, z: unlit flag, w: textured flag
    pub(crate) params: [f32; 4],
}

impl DrawUniforms {
    pub(crate) fn new(world: Mat4, material: &Material, repeat: [f32; 2], textured: bool) -> Self {
        let base = material.base_color();
        Self {
            model: world.to_cols_array_2d(),
            normal: world.inverse().transpose().to_cols_array_2d(),
            base_color: srgb_to_linear(base.truncate()).extend(base.w).to_array(),
            emissive: srgb_to_linear(material.emissive()).extend(0.0).to_array(),
            params: [
                repeat[0],
                repeat[1],
                if material.is_lit() { 0.0 } else { 1.0 },
                if textured { 1.0 } else { 0.0 },
            ],
        }
    }
}

pub(crate) struct ScenePipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) globals_layout: wgpu::BindGroupLayout,
    pub(crate) draw_layout: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub(crate) fn create_scene_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> ScenePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(viewer_core::SCENE_WGSL.into()),
    });
    let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("globals_bgl"),
        entries: &[uniform_entry(0)],
    });
    let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("draw_bgl"),
        entries: &[
            uniform_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&globals_layout, &draw_layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            // glTF winding is not trusted; draw both faces
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    ScenePipeline {
        pipeline,
        globals_layout,
        draw_layout,
    }
}
