//! # Draw — Replaying a DrawList on the GPU
//!
//! ```text
//! render(frame, list)
//!   ├─ 1. depth texture follows the surface size
//!   ├─ 2. FrameParams → frame uniform (group 0)
//!   ├─ 3. one ObjectUniform per command → dynamic buffer (group 1)
//!   └─ 4. render pass, commands in list order
//!         Lit    → mesh or ground pipeline, material group 2, draw
//!         Shadow → shadow pipeline, draw the same mesh flattened
//! ```
//!
//! Commands keep their order, so each entity's shadow directly follows the
//! entity itself, exactly as the scene emitted them.

use super::library::ModelLibrary;
use super::pipeline::Pipelines;
use super::vertex::{FrameUniform, ObjectUniform};
use crate::asset::ModelId;
use crate::draw::{DrawCommand, DrawList};
use crate::render::pass::{ClearColor, FrameContext};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Bound {
    Mesh,
    Ground,
    Shadow,
}

pub(crate) fn render_draw_list(
    pipelines: &mut Pipelines,
    library: &ModelLibrary,
    frame: &mut FrameContext<'_>,
    list: &DrawList,
    clear: ClearColor,
) {
    let gpu = frame.gpu;

    // ── 1. Depth ────────────────────────────────────────────────────────
    let (w, h) = gpu.surface_size();
    pipelines.resize_depth_if_needed(&gpu.device, w, h);

    // ── 2. Frame uniform ────────────────────────────────────────────────
    if let Some(params) = &list.frame {
        let uniform = FrameUniform::from(params);
        gpu.queue
            .write_buffer(&pipelines.frame_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    // ── 3. Object uniforms ──────────────────────────────────────────────
    let count = list.commands.len();
    let stride = pipelines.ensure_object_capacity(&gpu.device, count) as usize;
    if count > 0 {
        let mut data = vec![0u8; stride * count];
        for (i, command) in list.commands.iter().enumerate() {
            let uniform = match command {
                DrawCommand::Lit { transforms, .. } => ObjectUniform::from(transforms),
                DrawCommand::Shadow { model_matrix, .. } => ObjectUniform::shadow(*model_matrix),
            };
            let bytes = bytemuck::bytes_of(&uniform);
            data[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        gpu.queue.write_buffer(&pipelines.object_buffer, 0, &data);
    }

    // ── 4. Render pass ──────────────────────────────────────────────────
    let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("scene pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.into()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &pipelines.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if list.frame.is_none() {
        return;
    }
    pass.set_bind_group(0, &pipelines.frame_bind_group, &[]);

    let mut bound: Option<Bound> = None;
    for (i, command) in list.commands.iter().enumerate() {
        let offset = (i * stride) as u32;
        let entry = library.get(command.model());
        let wanted = match command {
            DrawCommand::Lit { model: ModelId::Ground, .. } => Bound::Ground,
            DrawCommand::Lit { .. } => Bound::Mesh,
            // The ground's vertices do not fit the shadow layout; it never
            // casts one anyway.
            DrawCommand::Shadow { model: ModelId::Ground, .. } => continue,
            DrawCommand::Shadow { .. } => Bound::Shadow,
        };

        if bound != Some(wanted) {
            pass.set_pipeline(match wanted {
                Bound::Mesh => &pipelines.mesh,
                Bound::Ground => &pipelines.ground,
                Bound::Shadow => &pipelines.shadow,
            });
            bound = Some(wanted);
        }

        pass.set_bind_group(1, &pipelines.object_bind_group, &[offset]);
        if !command.is_shadow() {
            pass.set_bind_group(2, &entry.material, &[]);
        }
        entry.mesh.draw(&mut pass);
    }
}
