//! Surface reflectance for the Blinn–Phong mesh shader.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Ambient, diffuse and specular coefficients plus the specular exponent.
///
/// The shader combines them per light as
/// `La·ka + Le·kd·texel·max(0, N·L) + Le·ks·max(0, N·H)^shininess`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Vec3::splat(0.1),
            kd: Vec3::ONE,
            ks: Vec3::splat(0.3),
            shininess: 50.0,
        }
    }
}
