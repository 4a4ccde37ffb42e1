use super::helpers;
use viewer_core::{Texture, WrapMode};

/// A scene texture on the GPU with a sampler matching its wrap mode.
pub(crate) struct GpuTexture {
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    _texture: wgpu::Texture,
}

impl GpuTexture {
    /// Images larger than the device allows are shrunk to fit first.
    pub(crate) fn upload(device: &wgpu::Device, queue: &wgpu::Queue, texture: &Texture) -> Self {
        let limit = device.limits().max_texture_dimension_2d;
        let shrunk = texture.downscaled(limit);
        if let Some(small) = &shrunk {
            log::warn!(
                "[gpu] texture {}x{} exceeds {} px, downscaled to {}x{}",
                texture.width,
                texture.height,
                limit,
                small.width,
                small.height
            );
        }
        let texture = shrunk.as_ref().unwrap_or(texture);
        let (tex, view) = helpers::create_color_texture_device(
            device,
            texture.source.as_deref().unwrap_or("scene_texture"),
            texture.width,
            texture.height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * texture.width),
                rows_per_image: Some(texture.height),
            },
            wgpu::Extent3d {
                width: texture.width,
                height: texture.height,
                depth_or_array_layers: 1,
            },
        );
        let address_mode = match texture.wrap {
            WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
        };
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene_sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            view,
            sampler,
            _texture: tex,
        }
    }
}
