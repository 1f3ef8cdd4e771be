//! # Math — glam Re-Exports and Scene Conventions
//!
//! Vectors and matrices come straight from [glam](https://docs.rs/glam). This
//! module adds the handful of conventions the scene relies on: yaw and roll
//! matrices in degrees, the player heading derived from an orientation, and a
//! normalize that never produces NaN.
//!
//! ## Row Vectors vs. Column Vectors
//!
//! The scene's transform recipes are written the "row-vector" way, where a
//! point is transformed as `v · M` and a model matrix reads left to right in
//! application order:
//!
//! ```text
//! row-vector:     Model = S · R · T          MVP = Model · View · Proj
//! glam (column):  model = T * R * S          mvp = proj * view * model
//! ```
//!
//! Both describe the same mapping; glam's matrix is the transpose of the
//! row-vector matrix, so every product simply reverses order. Everything in
//! this crate is stored and uploaded in glam's column-major layout.
//!
//! ## Yaw Sign
//!
//! Orientation is a yaw in degrees about +Y. The yaw matrix maps `(x, y, z)`
//! to `(x·cos a − z·sin a, y, x·sin a + z·cos a)`, which in glam is
//! `Mat4::from_rotation_y(-a)`. The heading vector `(cos b, 0, sin b)` with
//! `b = orientation + 180°` follows the same handedness, so turning the
//! orientation turns the model and its heading together.
//!
//! ## Comparison
//!
//! - **Bevy**: `Transform` stores a quaternion and derives the matrix on demand.
//! - **three.js**: `Object3D.rotation` holds Euler angles in radians.
//! - **Our approach**: a single yaw angle in degrees plus an optional roll,
//!   since nothing in the scene ever pitches.

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Squared lengths below this are treated as zero by [`normalize_or`].
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Normalize `v`, or return `fallback` when `v` has (near) zero length.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > NORMALIZE_EPSILON && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// Rotation about +Y by `degrees` in the scene's yaw convention.
pub fn yaw_matrix(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(-degrees.to_radians())
}

/// Rotation about +Z (the roll used by the spinning projectile and the
/// falling player) by `degrees`.
pub fn roll_matrix(degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(degrees.to_radians())
}

/// Unit heading in the XZ plane for an orientation in degrees.
///
/// `heading(0.0)` points down −X; `heading(90.0)` points down −Z.
pub fn heading(orientation_degrees: f32) -> Vec3 {
    let angle = (orientation_degrees + 180.0).to_radians();
    normalize_or(Vec3::new(angle.cos(), 0.0, angle.sin()), Vec3::NEG_X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn normalize_yields_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 0.0005),
            Vec3::new(1e4, -2e4, 3e4),
        ] {
            let len = normalize_or(v, Vec3::Y).length();
            assert!((len - 1.0).abs() < 1e-5, "normalize({v}) has length {len}");
        }
    }

    #[test]
    fn normalize_zero_uses_fallback() {
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::Z), Vec3::Z);
        assert_eq!(normalize_or(Vec3::splat(f32::NAN), Vec3::X), Vec3::X);
    }

    #[test]
    fn matrix_product_is_associative() {
        let mut rng = StdRng::seed_from_u64(0x6d61_7434);
        let mut random = || Mat4::from_cols_array(&std::array::from_fn(|_| rng.gen_range(-2.0_f32..2.0)));
        for _ in 0..256 {
            let (a, b, c) = (random(), random(), random());
            let left = (a * b) * c;
            let right = a * (b * c);
            assert!(left.abs_diff_eq(right, 1e-3), "(A·B)·C = {left} but A·(B·C) = {right}");
        }

        // The scene's own building blocks, at awkward angles.
        let a = yaw_matrix(-33.0) * roll_matrix(71.0) * Mat4::from_translation(Vec3::new(-4.0, 0.25, 9.0));
        let b = Mat4::perspective_rh(0.9, 1.3, 0.1, 50.0);
        let c = Mat4::from_scale(Vec3::new(2.0, 0.5, 0.01));
        assert!(((a * b) * c).abs_diff_eq(a * (b * c), 1e-4));
    }

    #[test]
    fn yaw_matches_row_vector_recipe() {
        // Row-vector yaw: (x·cos a − z·sin a, y, x·sin a + z·cos a)
        let a = 30.0_f32.to_radians();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let expected = Vec3::new(
            p.x * a.cos() - p.z * a.sin(),
            p.y,
            p.x * a.sin() + p.z * a.cos(),
        );
        let got = yaw_matrix(30.0).transform_point3(p);
        assert!(got.abs_diff_eq(expected, 1e-5), "expected {expected}, got {got}");
    }

    #[test]
    fn heading_at_zero_points_down_negative_x() {
        let h = heading(0.0);
        assert!(h.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6), "got {h}");
    }

    #[test]
    fn heading_at_player_start_orientation() {
        // (cos 273.63°, 0, sin 273.63°)
        let h = heading(93.63);
        assert!(
            h.abs_diff_eq(Vec3::new(0.063_313, 0.0, -0.997_994), 1e-4),
            "got {h}"
        );
    }

    #[test]
    fn heading_is_always_unit_length() {
        for deg in [-720.0, -90.0, 0.0, 45.0, 93.63, 359.9, 1e5] {
            let len = heading(deg).length();
            assert!((len - 1.0).abs() < 1e-5, "heading({deg}) has length {len}");
        }
    }
}
