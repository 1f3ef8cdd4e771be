//! glTF/GLB import.
//!
//! Only geometry is extracted. Every primitive of every mesh is merged into a
//! single [`MeshData`], since a scene model is one drawable with one
//! texture. Materials, hierarchy and animation are ignored: the texture comes
//! from the model's config entry, as it does for OBJ files.

use std::path::Path;

use super::{MeshData, MeshVertex};
use crate::error::{Error, Result};

/// Import a `.gltf` or `.glb` file into one merged triangle list.
pub fn load(path: &Path) -> Result<MeshData> {
    let (document, buffers, _images) = gltf::import(path).map_err(|source| Error::Gltf {
        path: path.to_owned(),
        source,
    })?;

    let mut mesh = MeshData::default();

    for gltf_mesh in document.meshes() {
        for primitive in gltf_mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "'{}': skipping non-triangle primitive in mesh {:?}",
                    path.display(),
                    gltf_mesh.name()
                );
                continue;
            }
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();

            // Normals (optional, default to +Y)
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);

            // UVs (optional, default to [0, 0])
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

            let base = mesh.vertices.len() as u32;
            mesh.vertices
                .extend(positions.iter().enumerate().map(|(i, pos)| MeshVertex {
                    position: *pos,
                    normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                    uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                }));

            match reader.read_indices() {
                Some(indices) => mesh
                    .indices
                    .extend(indices.into_u32().map(|i| base + i)),
                None => mesh
                    .indices
                    .extend((0..positions.len() as u32).map(|i| base + i)),
            }
        }
    }

    if mesh.is_empty() {
        return Err(Error::EmptyMesh {
            path: path.to_owned(),
        });
    }
    log::debug!(
        "Imported '{}': {} triangles",
        path.display(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
