//! Per-frame surface acquire, command recording, submit and present.

use crate::render::gpu::GpuContext;

/// Background colour of the main pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor(pub [f64; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        Self([0.0, 0.0, 1.0, 1.0])
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        wgpu::Color {
            r: c.0[0],
            g: c.0[1],
            b: c.0[2],
            a: c.0[3],
        }
    }
}

/// Everything a renderer needs to record one frame's passes.
pub struct FrameContext<'a> {
    pub encoder: wgpu::CommandEncoder,
    pub view: wgpu::TextureView,
    pub gpu: &'a GpuContext,
}

/// Acquire the next surface texture, let `record` add passes, then submit
/// and present.
pub fn render_frame(
    gpu: &GpuContext,
    record: impl FnOnce(&mut FrameContext<'_>),
) -> Result<(), wgpu::SurfaceError> {
    let output = gpu.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tigger frame encoder"),
        });

    let mut frame = FrameContext { encoder, view, gpu };
    record(&mut frame);

    gpu.queue.submit(std::iter::once(frame.encoder.finish()));
    output.present();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_converts_channel_by_channel() {
        let c: wgpu::Color = ClearColor([0.1, 0.2, 0.3, 0.4]).into();
        assert_eq!((c.r, c.g, c.b, c.a), (0.1, 0.2, 0.3, 0.4));
    }
}
