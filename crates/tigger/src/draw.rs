//! # Draw — What the Scene Hands the Renderer
//!
//! The scene never touches the GPU. Each frame it describes itself to a
//! [`DrawSink`]: one [`FrameParams`] up front, then an ordered stream of lit
//! draws and shadow draws.
//!
//! ```text
//! Scene::draw(sink)
//!   ├─ begin_frame(FrameParams)        camera, lights, shadow plane
//!   └─ for each entity, in scene order
//!        ├─ draw_lit(model, transforms)
//!        └─ draw_shadow(model, model_matrix)   unless it is the ground
//! ```
//!
//! [`DrawList`] records the stream as plain data. The window loop fills one
//! per frame and the renderer replays it; tests inspect it directly.

use crate::asset::ModelId;
use crate::light::Light;
use crate::math::{Mat4, Vec3, Vec4};
use crate::transform::ObjectTransforms;

/// Per-frame values shared by every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub view_projection: Mat4,
    pub eye: Vec3,
    pub key_light: Light,
    pub spotlight: Light,
    /// Homogeneous position shadows are cast from.
    pub shadow_light: Vec4,
    pub shadow_plane_y: f32,
}

/// Receiver of a frame's draw stream.
pub trait DrawSink {
    fn begin_frame(&mut self, params: FrameParams);
    fn draw_lit(&mut self, model: ModelId, transforms: &ObjectTransforms);
    fn draw_shadow(&mut self, model: ModelId, model_matrix: Mat4);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Lit {
        model: ModelId,
        transforms: ObjectTransforms,
    },
    Shadow {
        model: ModelId,
        model_matrix: Mat4,
    },
}

impl DrawCommand {
    pub fn model(&self) -> ModelId {
        match self {
            DrawCommand::Lit { model, .. } | DrawCommand::Shadow { model, .. } => *model,
        }
    }

    pub fn is_shadow(&self) -> bool {
        matches!(self, DrawCommand::Shadow { .. })
    }
}

/// A recorded frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub frame: Option<FrameParams>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.frame = None;
        self.commands.clear();
    }

    pub fn lit(&self) -> impl Iterator<Item = (ModelId, &ObjectTransforms)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Lit { model, transforms } => Some((*model, transforms)),
            DrawCommand::Shadow { .. } => None,
        })
    }

    pub fn shadows(&self) -> impl Iterator<Item = (ModelId, Mat4)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Shadow { model, model_matrix } => Some((*model, *model_matrix)),
            DrawCommand::Lit { .. } => None,
        })
    }
}

impl DrawSink for DrawList {
    fn begin_frame(&mut self, params: FrameParams) {
        self.clear();
        self.frame = Some(params);
    }

    fn draw_lit(&mut self, model: ModelId, transforms: &ObjectTransforms) {
        self.commands.push(DrawCommand::Lit {
            model,
            transforms: *transforms,
        });
    }

    fn draw_shadow(&mut self, model: ModelId, model_matrix: Mat4) {
        self.commands.push(DrawCommand::Shadow { model, model_matrix });
    }
}
