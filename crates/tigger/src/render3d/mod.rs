//! # Render3d — Forward Renderer for the Scene
//!
//! Replays the scene's [`DrawList`] with wgpu. The simulation never sees any
//! of this; it only fills the list.
//!
//! ## Architecture
//!
//! ```text
//!   Scene::draw ──▶ DrawList ─────────────────────────────┐
//!                   FrameParams, [Lit | Shadow]…           │
//!                                                          ▼
//!   AssetsConfig ──▶ ModelLibrary            ┌──────────────────────────┐
//!                   per ModelId:             │ render pass              │
//!                   GpuMesh + material group │ • group 0 once           │
//!                          │                 │ • group 1 per command    │
//!                          └───────────────▶ │   (dynamic offset)       │
//!                                            │ • group 2 per lit draw   │
//!                                            │ • mesh / ground / shadow │
//!                                            │   pipelines              │
//!                                            └──────────────────────────┘
//! ```
//!
//! ## Lighting
//!
//! Blinn–Phong with two lights, the directional key light and the point
//! spotlight over the player:
//!
//! ```text
//! colour = Σ  La·ka + Le·kd·texel·max(0, N·L) + Le·ks·max(0, N·H)^shininess
//!        lights
//! ```
//!
//! Shadows are a second draw of each caster, flattened onto a plane just above
//! the ground in the vertex stage and filled with a flat dark green.
//!
//! ## Comparison
//!
//! - **Bevy**: PBR, shadow maps, and a render graph with many phases.
//! - **Our approach**: two lights, planar shadows, one pass, in draw order.

pub(crate) mod draw;
pub(crate) mod library;
pub(crate) mod mesh;
pub(crate) mod pipeline;
pub(crate) mod texture;
pub(crate) mod vertex;

use crate::config::AssetsConfig;
use crate::draw::DrawList;
use crate::render::{ClearColor, FrameContext, GpuContext};

use self::library::ModelLibrary;
use self::pipeline::Pipelines;

/// All GPU state for drawing the scene.
pub struct Renderer {
    pipelines: Pipelines,
    library: ModelLibrary,
    clear: ClearColor,
}

impl Renderer {
    /// Build pipelines and load every model. Missing asset files degrade to
    /// fallbacks, so this cannot fail once the GPU is up.
    pub fn new(gpu: &GpuContext, assets: &AssetsConfig, clear: ClearColor) -> Self {
        let pipelines = Pipelines::new(gpu);
        let library = ModelLibrary::load(gpu, &pipelines.material_layout, assets);
        log::info!("renderer ready ({:?})", gpu.surface_format());
        Self {
            pipelines,
            library,
            clear,
        }
    }

    /// Record the scene pass for `list` into `frame`.
    pub fn render(&mut self, frame: &mut FrameContext<'_>, list: &DrawList) {
        draw::render_draw_list(&mut self.pipelines, &self.library, frame, list, self.clear);
    }
}
