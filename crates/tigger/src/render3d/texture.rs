//! Texture upload and the shared sampler.
//!
//! Textures are sampled with `Repeat` addressing: the ground tiles its grass
//! by taking `fract` of world coordinates, and OBJ UVs may leave [0, 1].

use wgpu::util::DeviceExt;

use crate::asset::texture::TextureData;
use crate::render::GpuContext;

/// Upload RGBA8 pixels as an sRGB texture and return its view.
pub(crate) fn upload_rgba8(gpu: &GpuContext, label: &str, data: &TextureData) -> wgpu::TextureView {
    let texture = gpu.device.create_texture_with_data(
        &gpu.queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &data.rgba,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

pub(crate) fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("diffuse sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
