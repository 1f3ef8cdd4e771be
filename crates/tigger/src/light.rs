//! Lights.
//!
//! A light's position is homogeneous: `w = 1` is a point light at `xyz`,
//! `w = 0` is a directional light shining *from* direction `xyz`. The shaders
//! compute the surface-to-light vector as `light.xyz − p·light.w`, which
//! covers both cases without branching.

use crate::math::{Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Ambient colour (`La`).
    pub ambient: Vec3,
    /// Emitted colour (`Le`).
    pub emitted: Vec3,
    pub position: Vec4,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: Vec3::ONE,
            emitted: Vec3::ONE,
            position: Vec4::new(0.0, 1.0, 0.0, 0.0),
        }
    }
}

impl Light {
    pub fn directional(toward: Vec3) -> Self {
        Self::default().with_direction(toward)
    }

    pub fn point(at: Vec3) -> Self {
        Self::default().with_point(at)
    }

    pub fn with_direction(mut self, toward: Vec3) -> Self {
        self.position = toward.extend(0.0);
        self
    }

    pub fn with_point(mut self, at: Vec3) -> Self {
        self.position = at.extend(1.0);
        self
    }

    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_emitted(mut self, emitted: Vec3) -> Self {
        self.emitted = emitted;
        self
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    /// Unit vector from a world-space surface point toward the light, as
    /// `shade_one` in `lit.wgsl` computes it. Falls back to straight up if the
    /// point sits on the light.
    #[cfg(test)]
    fn direction_from(&self, surface: Vec3) -> Vec3 {
        let to_light = self.position.truncate() - surface * self.position.w;
        crate::math::normalize_or(to_light, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_light_ignores_surface_position() {
        let light = Light::directional(Vec3::new(0.0, 20.0, 15.0));
        let expected = Vec3::new(0.0, 0.8, 0.6);
        for p in [Vec3::ZERO, Vec3::new(5.0, -1.0, 3.0)] {
            assert!(light.direction_from(p).abs_diff_eq(expected, 1e-6));
        }
        assert!(light.is_directional());
    }

    #[test]
    fn point_light_points_from_surface_to_light() {
        let light = Light::point(Vec3::new(1.0, 10.0, 2.0));
        let l = light.direction_from(Vec3::new(1.0, 0.0, 2.0));
        assert!(l.abs_diff_eq(Vec3::Y, 1e-6), "got {l}");
        assert!(!light.is_directional());
    }

    #[test]
    fn surface_on_point_light_falls_back_to_up() {
        let light = Light::point(Vec3::splat(3.0));
        assert_eq!(light.direction_from(Vec3::splat(3.0)), Vec3::Y);
    }
}
