//! # Library — One Mesh and One Material per Model
//!
//! Built once at startup from the `assets` config section. Every [`ModelId`]
//! gets an entry, whatever happens on disk: a missing mesh becomes a sphere
//! and a missing texture a solid colour (see [`asset::model_mesh`] and
//! [`asset::model_texture`]). The ground ignores its mesh entry and always
//! uses the built-in infinite fan.
//!
//! The library owns all GPU resources for models and drops them together
//! when the renderer goes away.

use wgpu::util::DeviceExt;

use super::mesh::GpuMesh;
use super::texture::{create_sampler, upload_rgba8};
use super::vertex::MaterialUniform;
use crate::asset::{self, shapes, ModelId};
use crate::config::AssetsConfig;
use crate::render::GpuContext;

pub(crate) struct ModelEntry {
    pub mesh: GpuMesh,
    /// Group 2: material uniform, diffuse texture, sampler.
    pub material: wgpu::BindGroup,
}

pub(crate) struct ModelLibrary {
    entries: Vec<ModelEntry>,
}

impl ModelLibrary {
    pub fn load(gpu: &GpuContext, material_layout: &wgpu::BindGroupLayout, assets: &AssetsConfig) -> Self {
        let sampler = create_sampler(&gpu.device);
        let entries = ModelId::ALL
            .iter()
            .map(|&id| load_entry(gpu, material_layout, &sampler, assets, id))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: ModelId) -> &ModelEntry {
        &self.entries[id.index()]
    }
}

fn load_entry(
    gpu: &GpuContext,
    material_layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    assets: &AssetsConfig,
    id: ModelId,
) -> ModelEntry {
    let label = format!("{id:?}");
    let mesh = match id {
        ModelId::Ground => GpuMesh::from_ground(&gpu.device, &shapes::ground_fan()),
        _ => GpuMesh::from_mesh(&gpu.device, &label, &asset::model_mesh(assets, id)),
    };

    let texture = upload_rgba8(gpu, &label, &asset::model_texture(assets, id));
    let uniform = MaterialUniform::from(&assets.spec(id).material);
    let buffer = gpu
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
    let material = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&label),
        layout: material_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    ModelEntry { mesh, material }
}
