//! Window-surface plumbing shared by the 3D renderer: the wgpu device and
//! surface ([`gpu`]) and per-frame acquire/submit/present ([`pass`]).

pub mod gpu;
pub mod pass;

pub use gpu::GpuContext;
pub use pass::{render_frame, ClearColor, FrameContext};
