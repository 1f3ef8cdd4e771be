//! # Shapes — Built-In Geometry
//!
//! Two meshes never come from disk:
//!
//! - **Sphere**: the stand-in for any model whose file is missing, so the
//!   game stays playable from a bare checkout.
//! - **Ground fan**: the infinite plane. Its outer corners are *ideal points*
//!   (w = 0), which the GPU projects out to the horizon.
//!
//! ## The Infinite Ground
//!
//! ```text
//!            (-1,0,-1,0)          (1,0,-1,0)
//!                  ┌───────────────┐
//!                  │ ╲           ╱ │
//!                  │   ╲       ╱   │
//!                  │     (0,0,0,1) │       4 triangles, all sharing the
//!                  │   ╱       ╲   │       finite centre, wound CCW when
//!                  │ ╱           ╲ │       seen from above (+Y)
//!                  └───────────────┘
//!            (-1,0, 1,0)          (1,0, 1,0)
//! ```
//!
//! A homogeneous vertex with w = 0 is a direction, not a place: after the
//! model-view-projection transform it lands on the vanishing line, so four
//! triangles cover the whole visible plane with no far edge.

use bytemuck::{Pod, Zeroable};

use super::{MeshData, MeshVertex};

/// Vertex for the infinite ground: homogeneous position plus normal.
///
/// No UVs. The ground shader derives texture coordinates from the world
/// position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GroundVertex {
    pub position: [f32; 4],
    pub normal: [f32; 3],
    pub _pad: f32,
}

/// Generate a UV sphere of the given radius centred at the origin.
///
/// `segments` is the number of horizontal divisions (longitude), `rings` the
/// number of vertical divisions (latitude). U wraps around longitude, V runs
/// from the north pole (0) to the south pole (1).
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * std::f32::consts::PI;

        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;

            let x = phi.sin() * theta.cos();
            let y = phi.cos();
            let z = phi.sin() * theta.sin();

            vertices.push(MeshVertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
                uv: [u, v],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// The four-triangle infinite ground fan (12 vertices, drawn non-indexed).
pub fn ground_fan() -> Vec<GroundVertex> {
    const CENTRE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    const RIM: [[f32; 4]; 4] = [
        [-1.0, 0.0, -1.0, 0.0],
        [-1.0, 0.0, 1.0, 0.0],
        [1.0, 0.0, 1.0, 0.0],
        [1.0, 0.0, -1.0, 0.0],
    ];

    let vertex = |position| GroundVertex {
        position,
        normal: [0.0, 1.0, 0.0],
        _pad: 0.0,
    };

    (0..RIM.len())
        .flat_map(|i| [vertex(CENTRE), vertex(RIM[i]), vertex(RIM[(i + 1) % RIM.len()])])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn sphere_has_correct_counts() {
        let mesh = sphere(0.5, 32, 16);
        assert_eq!(mesh.vertices.len(), (17 * 33) as usize);
        assert_eq!(mesh.indices.len(), (16 * 32 * 6) as usize);
    }

    #[test]
    fn sphere_vertices_sit_on_radius() {
        let mesh = sphere(15.0, 8, 4);
        for v in &mesh.vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 15.0).abs() < 1e-3, "vertex at radius {r}");
            let n = Vec3::from(v.normal).length();
            assert!((n - 1.0).abs() < 1e-5, "normal should be unit length, got {n}");
        }
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = sphere(1.0, 8, 4);
        for &idx in &mesh.indices {
            assert!((idx as usize) < mesh.vertices.len(), "index {idx} out of range");
        }
    }

    #[test]
    fn ground_fan_is_four_upward_triangles() {
        let fan = ground_fan();
        assert_eq!(fan.len(), 12);
        for tri in fan.chunks(3) {
            assert_eq!(tri[0].position, [0.0, 0.0, 0.0, 1.0], "every triangle starts at the centre");
            let a = Vec3::new(tri[1].position[0], 0.0, tri[1].position[2]);
            let b = Vec3::new(tri[2].position[0], 0.0, tri[2].position[2]);
            assert!(a.cross(b).y > 0.0, "triangle should wind CCW seen from +Y");
            assert_eq!(tri[1].position[3], 0.0, "rim vertices are at infinity");
        }
    }
}
