//! # Vertex — Buffer Layouts and Uniform Blocks
//!
//! ## Vertex Buffers
//!
//! ```text
//! MeshVertex (32 bytes)                     GroundVertex (32 bytes)
//! ┌──────────┬──────────┬────────┐          ┌──────────────┬──────────┬─────┐
//! │ position │ normal   │ uv     │          │ position     │ normal   │ pad │
//! │ f32 × 3  │ f32 × 3  │ f32 × 2│          │ f32 × 4      │ f32 × 3  │ f32 │
//! │ loc 0    │ loc 1    │ loc 2  │          │ loc 0        │ loc 1    │     │
//! └──────────┴──────────┴────────┘          └──────────────┴──────────┴─────┘
//! ```
//!
//! The ground keeps a homogeneous position so its outer corners can sit at
//! infinity (w = 0).
//!
//! ## Uniform Blocks
//!
//! | Group | Block           | Changes       | Size  |
//! |-------|-----------------|---------------|-------|
//! | 0     | `FrameUniform`  | once / frame  | 208 B |
//! | 1     | `ObjectUniform` | per draw, dynamic offset | 192 B |
//! | 2     | `MaterialUniform` + texture + sampler | per model | 48 B |
//!
//! Every member is a `vec4` or `mat4x4` (or a `vec3` followed by an `f32`)
//! so the Rust structs match WGSL's uniform layout without hidden padding.

use bytemuck::{Pod, Zeroable};

use crate::asset::shapes::GroundVertex;
use crate::asset::MeshVertex;
use crate::draw::FrameParams;
use crate::light::Light;
use crate::material::Material;
use crate::math::Mat4;
use crate::transform::ObjectTransforms;

pub(crate) const MESH_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        // position: vec3<f32>
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        // normal: vec3<f32>
        wgpu::VertexAttribute {
            offset: 12,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        // uv: vec2<f32>
        wgpu::VertexAttribute {
            offset: 24,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
    ],
};

pub(crate) const GROUND_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<GroundVertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        // position: vec4<f32>
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x4,
        },
        // normal: vec3<f32>
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ],
};

/// One light as the shaders see it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct LightData {
    pub ambient: [f32; 4],
    pub emitted: [f32; 4],
    /// w = 1 point, w = 0 directional.
    pub position: [f32; 4],
}

impl From<&Light> for LightData {
    fn from(light: &Light) -> Self {
        Self {
            ambient: light.ambient.extend(1.0).to_array(),
            emitted: light.emitted.extend(1.0).to_array(),
            position: light.position.to_array(),
        }
    }
}

/// Group 0: camera, both lights and the shadow projection.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub key_light: LightData,
    pub spotlight: LightData,
    pub shadow_light: [f32; 4],
    /// x = plane height; yzw unused.
    pub shadow_plane: [f32; 4],
}

impl From<&FrameParams> for FrameUniform {
    fn from(p: &FrameParams) -> Self {
        Self {
            view_proj: p.view_projection.to_cols_array_2d(),
            eye: p.eye.extend(1.0).to_array(),
            key_light: LightData::from(&p.key_light),
            spotlight: LightData::from(&p.spotlight),
            shadow_light: p.shadow_light.to_array(),
            shadow_plane: [p.shadow_plane_y, 0.0, 0.0, 0.0],
        }
    }
}

/// Group 1: per-draw matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub inverse_model: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
}

impl From<&ObjectTransforms> for ObjectUniform {
    fn from(t: &ObjectTransforms) -> Self {
        Self {
            model: t.model.to_cols_array_2d(),
            inverse_model: t.inverse_model.to_cols_array_2d(),
            mvp: t.mvp.to_cols_array_2d(),
        }
    }
}

impl ObjectUniform {
    /// The shadow pass reads only `model`.
    pub fn shadow(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            inverse_model: Mat4::IDENTITY.to_cols_array_2d(),
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// Group 2: Blinn–Phong coefficients.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct MaterialUniform {
    pub ka: [f32; 4],
    pub kd: [f32; 4],
    pub ks: [f32; 3],
    pub shininess: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            ka: m.ka.extend(1.0).to_array(),
            kd: m.kd.extend(1.0).to_array(),
            ks: m.ks.to_array(),
            shininess: m.shininess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<LightData>(), 48);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 208);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 192);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
        assert_eq!(std::mem::size_of::<GroundVertex>(), 32);
    }

    #[test]
    fn frame_uniform_carries_light_kind_in_w() {
        let params = FrameParams {
            view_projection: Mat4::IDENTITY,
            eye: Vec3::new(0.0, 0.0, 2.0),
            key_light: Light::directional(Vec3::new(0.0, 20.0, 15.0)),
            spotlight: Light::point(Vec3::new(1.0, 10.0, 2.0)),
            shadow_light: Vec4::new(0.0, 100.0, 0.0, 1.0),
            shadow_plane_y: -0.999,
        };
        let u = FrameUniform::from(&params);
        assert_eq!(u.key_light.position[3], 0.0);
        assert_eq!(u.spotlight.position, [1.0, 10.0, 2.0, 1.0]);
        assert_eq!(u.shadow_plane[0], -0.999);
        assert_eq!(u.eye, [0.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn material_uniform_packs_shininess_after_ks() {
        let u = MaterialUniform::from(&Material::default());
        assert_eq!(u.ks, [0.3, 0.3, 0.3]);
        assert_eq!(u.shininess, 50.0);
    }
}
