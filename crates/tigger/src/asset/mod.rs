//! # Assets — CPU-Side Mesh Data
//!
//! Everything here is plain data: no GPU handles. The renderer turns a
//! [`MeshData`] into buffers; the simulation only ever names a drawable by its
//! [`ModelId`].
//!
//! ## Sources
//!
//! | Loader            | Files          | Notes                              |
//! |-------------------|----------------|------------------------------------|
//! | [`obj`]           | `.obj`         | triangles and quads, UV v flipped  |
//! | `gltf` (feature)  | `.gltf` `.glb` | all primitives merged into one mesh|
//! | [`shapes`]        | (built in)     | fallback sphere, ground fan        |
//! | [`texture`]       | `.png` `.jpg`  | decoded to RGBA8                   |

pub mod obj;
pub mod shapes;
pub mod texture;

#[cfg(feature = "gltf")]
pub mod gltf;

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use self::texture::TextureData;

use crate::config::AssetsConfig;
use crate::error::Result;

/// Names every drawable the scene can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    Player,
    BlueSphere,
    YellowSphere,
    RedSphere,
    Bomb,
    Ground,
    Projectile,
}

impl ModelId {
    pub const ALL: [ModelId; 7] = [
        ModelId::Player,
        ModelId::BlueSphere,
        ModelId::YellowSphere,
        ModelId::RedSphere,
        ModelId::Bomb,
        ModelId::Ground,
        ModelId::Projectile,
    ];

    /// Dense index, used by the renderer's model table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-vertex data for lit meshes: position, surface normal, and texture UV.
///
/// 32 bytes, matching `@location(0..=2)` of `vs_mesh` in `lit.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// A triangle list ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Load a mesh file, picking the parser by extension.
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        #[cfg(feature = "gltf")]
        Some("gltf" | "glb") => gltf::load(path),
        _ => obj::load(path),
    }
}

/// Sphere resolution used for fallback meshes.
const FALLBACK_SEGMENTS: u32 = 32;
const FALLBACK_RINGS: u32 = 16;

/// The mesh configured for `id`, or a sphere of the configured fallback
/// radius if the file is unset, missing or unreadable.
pub fn model_mesh(assets: &AssetsConfig, id: ModelId) -> MeshData {
    let spec = assets.spec(id);
    let fallback = || shapes::sphere(spec.fallback_radius, FALLBACK_SEGMENTS, FALLBACK_RINGS);
    let Some(relative) = &spec.mesh else {
        return fallback();
    };
    let path = assets.resolve(relative);
    match load_mesh(&path) {
        Ok(mesh) => {
            log::info!("{id:?}: loaded '{}' ({} triangles)", path.display(), mesh.triangle_count());
            mesh
        }
        Err(err) => {
            log::warn!("{id:?}: {err}; drawing a sphere instead");
            fallback()
        }
    }
}

/// The texture configured for `id`, or a single pixel of the fallback colour.
pub fn model_texture(assets: &AssetsConfig, id: ModelId) -> TextureData {
    let spec = assets.spec(id);
    let Some(relative) = &spec.texture else {
        return TextureData::solid(spec.fallback_color);
    };
    let path = assets.resolve(relative);
    match texture::load(&path) {
        Ok(tex) => {
            log::info!("{id:?}: loaded '{}' ({}x{})", path.display(), tex.width, tex.height);
            tex
        }
        Err(err) => {
            log::warn!("{id:?}: {err}; using a solid colour");
            TextureData::solid(spec.fallback_color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn nowhere() -> AssetsConfig {
        AssetsConfig {
            root: PathBuf::from("no/such/asset/dir"),
            ..AssetsConfig::default()
        }
    }

    #[test]
    fn missing_mesh_falls_back_to_a_sphere_of_the_configured_radius() {
        let assets = nowhere();
        let mesh = model_mesh(&assets, ModelId::Player);
        assert!(!mesh.is_empty());
        let r = glam::Vec3::from(mesh.vertices[0].position).length();
        assert!((r - assets.player.fallback_radius).abs() < 1e-3, "radius {r}");
    }

    #[test]
    fn missing_texture_falls_back_to_the_configured_colour() {
        let assets = nowhere();
        let tex = model_texture(&assets, ModelId::Ground);
        assert_eq!(tex, TextureData::solid(assets.ground.fallback_color));
    }

    #[test]
    fn unknown_extension_goes_to_the_obj_parser() {
        let err = load_mesh(Path::new("no/such/model.xyz")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io { .. }), "got {err}");
    }

    #[test]
    fn model_ids_are_dense() {
        for (i, id) in ModelId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
