//! # Pipeline — Render Pipelines and Shared GPU Resources
//!
//! Three pipelines share one set of bind group layouts:
//!
//! | Pipeline | Shader entry          | Vertex layout  | Groups         |
//! |----------|-----------------------|----------------|----------------|
//! | mesh     | `vs_mesh`/`fs_mesh`   | `MeshVertex`   | frame, object, material |
//! | ground   | `vs_ground`/`fs_ground` | `GroundVertex` | frame, object, material |
//! | shadow   | `vs_shadow`/`fs_shadow` | `MeshVertex` (position only) | frame, object |
//!
//! Back faces are not culled: OBJ files in the wild mix windings, and the
//! ground fan is viewed from both sides when the camera dips below it.
//!
//! The shadow pipeline carries a small negative depth bias so the flattened
//! geometry, a hair above the ground, wins the depth test against it.
//!
//! ## Dynamic Object Buffer
//!
//! Group 1 holds every draw's [`ObjectUniform`] in one buffer, each at a
//! multiple of `min_uniform_buffer_offset_alignment`. A draw binds the group
//! with its own byte offset. The buffer grows (to the next power of two) when
//! a frame has more draws than slots.

use super::vertex::{FrameUniform, MaterialUniform, ObjectUniform, GROUND_VERTEX_LAYOUT, MESH_VERTEX_LAYOUT};
use crate::render::GpuContext;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const INITIAL_OBJECT_CAPACITY: usize = 64;

pub(crate) struct Pipelines {
    pub mesh: wgpu::RenderPipeline,
    pub ground: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,

    pub material_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,

    pub frame_buffer: wgpu::Buffer,
    pub frame_bind_group: wgpu::BindGroup,

    pub object_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
    object_capacity: usize,

    pub depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl Pipelines {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("lit.wgsl").into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });

        // ── Layouts ─────────────────────────────────────────────────────
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                false,
                std::mem::size_of::<FrameUniform>(),
            )],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                true,
                std::mem::size_of::<ObjectUniform>(),
            )],
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material layout"),
            entries: &[
                uniform_entry(
                    0,
                    wgpu::ShaderStages::FRAGMENT,
                    false,
                    std::mem::size_of::<MaterialUniform>(),
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        // ── Pipelines ───────────────────────────────────────────────────
        let format = gpu.surface_format();
        let mesh = build_pipeline(
            device,
            "mesh pipeline",
            &lit_layout,
            &lit_shader,
            ("vs_mesh", "fs_mesh"),
            MESH_VERTEX_LAYOUT,
            format,
            wgpu::DepthBiasState::default(),
        );
        let ground = build_pipeline(
            device,
            "ground pipeline",
            &lit_layout,
            &lit_shader,
            ("vs_ground", "fs_ground"),
            GROUND_VERTEX_LAYOUT,
            format,
            wgpu::DepthBiasState::default(),
        );
        let shadow = build_pipeline(
            device,
            "shadow pipeline",
            &shadow_layout,
            &shadow_shader,
            ("vs_shadow", "fs_shadow"),
            MESH_VERTEX_LAYOUT,
            format,
            wgpu::DepthBiasState {
                constant: -2,
                slope_scale: -1.0,
                clamp: 0.0,
            },
        );

        // ── Frame buffer ────────────────────────────────────────────────
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniform buffer"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let (object_buffer, object_bind_group) =
            create_object_buffer(device, &object_layout, INITIAL_OBJECT_CAPACITY);

        let (w, h) = gpu.surface_size();

        Self {
            mesh,
            ground,
            shadow,
            material_layout,
            object_layout,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            depth_view: create_depth_texture(device, w, h),
            depth_size: (w, h),
        }
    }

    /// Recreate the depth texture if the surface size changed.
    pub fn resize_depth_if_needed(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if (width, height) != self.depth_size && width > 0 && height > 0 {
            self.depth_view = create_depth_texture(device, width, height);
            self.depth_size = (width, height);
        }
    }

    /// Make room for `count` object slots. Returns the slot stride in bytes.
    pub fn ensure_object_capacity(&mut self, device: &wgpu::Device, count: usize) -> u32 {
        if count > self.object_capacity {
            let capacity = count.next_power_of_two();
            let (buffer, bind_group) = create_object_buffer(device, &self.object_layout, capacity);
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
            self.object_capacity = capacity;
            log::debug!("object buffer grown to {capacity} slots");
        }
        object_stride(device) as u32
    }
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    has_dynamic_offset: bool,
    size: usize,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs, fs): (&str, &str),
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
    bias: wgpu::DepthBiasState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias,
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn object_stride(device: &wgpu::Device) -> usize {
    let align = device.limits().min_uniform_buffer_offset_alignment as usize;
    align_up(std::mem::size_of::<ObjectUniform>(), align)
}

fn create_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let size = (object_stride(device) * capacity) as u64;
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object dynamic buffer"),
        size,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

/// Round `value` up to the next multiple of `align` (a power of two).
pub(crate) fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_power_of_two_multiples() {
        assert_eq!(align_up(192, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(192, 64), 192);
    }
}
