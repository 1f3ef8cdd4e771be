//! # Transform Pipeline — Per-Object Matrices
//!
//! Every drawn entity needs three matrices each frame:
//!
//! ```text
//! model          local → world         T * Roll * Yaw * S
//! inverse_model  world → local         S⁻¹ * Yaw⁻¹ * Roll⁻¹ * T⁻¹
//! mvp            local → clip          Proj * View * model
//! ```
//!
//! The inverse model is built from the inverted factors rather than by a
//! general 4x4 inverse. The mesh shader transforms normals as
//! `(vec4(n, 0) * inverse_model)`, i.e. by the transpose of the inverse, which
//! keeps them perpendicular to surfaces under non-uniform scale.
//!
//! The shadow pass needs only `model` and the frame's view-projection; the
//! projection onto the ground happens in the vertex stage.
//! [`project_to_plane`] is the same math on the CPU.

use crate::math::{roll_matrix, yaw_matrix, Mat4, Vec3};

/// Where and how an entity sits in the world, as far as rendering cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub scale: Vec3,
    /// Yaw about +Y, degrees.
    pub yaw: f32,
    /// Roll about +Z, degrees. Applied after the yaw.
    pub roll: f32,
}

impl Pose {
    pub fn new(position: Vec3, scale: Vec3, yaw: f32) -> Self {
        Self {
            position,
            scale,
            yaw,
            roll: 0.0,
        }
    }

    pub fn with_roll(mut self, roll: f32) -> Self {
        self.roll = roll;
        self
    }

    /// Local → world.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * roll_matrix(self.roll)
            * yaw_matrix(self.yaw)
            * Mat4::from_scale(self.scale)
    }

    /// World → local, composed from the inverted factors in reverse order.
    ///
    /// Callers guarantee non-zero scale (entities reject it at construction).
    pub fn inverse_model(&self) -> Mat4 {
        Mat4::from_scale(self.scale.recip())
            * yaw_matrix(-self.yaw)
            * roll_matrix(-self.roll)
            * Mat4::from_translation(-self.position)
    }
}

/// The matrices uploaded for one lit draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransforms {
    pub model: Mat4,
    pub inverse_model: Mat4,
    pub mvp: Mat4,
}

impl ObjectTransforms {
    pub fn new(pose: &Pose, view_projection: Mat4) -> Self {
        let model = pose.model();
        Self {
            model,
            inverse_model: pose.inverse_model(),
            mvp: view_projection * model,
        }
    }
}

/// Project `point` onto the horizontal plane `y = plane_y` along the ray from
/// a point light at `light`.
///
/// Mirrors the vertex stage of `shadow.wgsl`. A point level with the light has
/// no intersection; it is dropped straight down instead.
pub fn project_to_plane(point: Vec3, light: Vec3, plane_y: f32) -> Vec3 {
    let dy = point.y - light.y;
    if dy.abs() < 1e-6 {
        return Vec3::new(point.x, plane_y, point.z);
    }
    let t = (plane_y - light.y) / dy;
    Vec3::new(
        (point.x - light.x) * t + light.x,
        plane_y,
        (point.z - light.z) * t + light.z,
    )
}
