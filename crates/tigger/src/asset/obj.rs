//! Wavefront OBJ import.
//!
//! Supports the subset the game's models use: positions (`v`), texture
//! coordinates (`vt`), normals (`vn`), and triangle or quad faces (`f`) with
//! any of the `v`, `v/t`, `v//n`, `v/t/n` corner forms. Indices are 1-based;
//! negative indices count back from the most recent element. Grouping,
//! smoothing and material statements are ignored.
//!
//! The output is de-indexed: every face corner becomes its own vertex. Texture
//! `v` is flipped to `1 − v` since OBJ puts the origin bottom-left and wgpu
//! samples top-left. Corners without a normal get the face normal.

use std::path::Path;

use super::{MeshData, MeshVertex};
use crate::error::{Error, Result};
use crate::math::{normalize_or, Vec2, Vec3};

/// A parse failure, before we know which file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    fn at(self, path: &Path) -> Error {
        Error::ObjParse {
            path: path.to_owned(),
            line: self.line,
            message: self.message,
        }
    }
}

/// Read and parse an OBJ file.
pub fn load(path: &Path) -> Result<MeshData> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let mesh = parse(&text).map_err(|e| e.at(path))?;
    if mesh.is_empty() {
        return Err(Error::EmptyMesh {
            path: path.to_owned(),
        });
    }
    log::debug!(
        "Parsed '{}': {} triangles",
        path.display(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// One face corner after index resolution (0-based).
#[derive(Clone, Copy)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

/// Parse OBJ source text.
pub fn parse(text: &str) -> std::result::Result<MeshData, ParseError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut mesh = MeshData::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&args, line_no, "vertex position")?;
                positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&args, line_no, "texture coordinate")?;
                uvs.push(Vec2::new(u, 1.0 - v));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&args, line_no, "normal")?;
                normals.push(Vec3::new(x, y, z));
            }
            "f" => {
                if !(3..=4).contains(&args.len()) {
                    return Err(ParseError::new(
                        line_no,
                        format!("face has {} vertices, expected 3 or 4", args.len()),
                    ));
                }
                let corners = args
                    .iter()
                    .map(|token| {
                        parse_corner(token, positions.len(), uvs.len(), normals.len(), line_no)
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                emit_triangle(&mut mesh, &positions, &uvs, &normals, [corners[0], corners[1], corners[2]]);
                if corners.len() == 4 {
                    emit_triangle(&mut mesh, &positions, &uvs, &normals, [corners[0], corners[2], corners[3]]);
                }
            }
            // Grouping, objects, smoothing and materials carry nothing we draw.
            "g" | "o" | "s" | "usemtl" | "mtllib" | "l" | "p" => {}
            other => log::debug!("obj line {line_no}: ignoring '{other}'"),
        }
    }

    Ok(mesh)
}

fn parse_floats<const N: usize>(
    args: &[&str],
    line: usize,
    what: &str,
) -> std::result::Result<[f32; N], ParseError> {
    if args.len() < N {
        return Err(ParseError::new(
            line,
            format!("invalid {what} (expected {N} values, found {})", args.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token
            .parse::<f32>()
            .map_err(|_| ParseError::new(line, format!("invalid number '{token}' in {what}")))?;
    }
    Ok(out)
}

fn parse_corner(
    token: &str,
    position_count: usize,
    uv_count: usize,
    normal_count: usize,
    line: usize,
) -> std::result::Result<Corner, ParseError> {
    let mut fields = token.split('/');
    let position = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::new(line, format!("face corner '{token}' has no position")))?;
    let position = resolve_index(position, position_count, line)?;
    let uv = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, uv_count, line)?),
        _ => None,
    };
    let normal = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, normal_count, line)?),
        _ => None,
    };
    Ok(Corner {
        position,
        uv,
        normal,
    })
}

/// Turn a 1-based (or negative, relative) OBJ index into a 0-based one.
fn resolve_index(token: &str, count: usize, line: usize) -> std::result::Result<usize, ParseError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| ParseError::new(line, format!("invalid index '{token}'")))?;
    let resolved = match raw {
        0 => None,
        n if n > 0 => Some(n as usize - 1),
        n => (count as i64 + n).try_into().ok(),
    };
    match resolved {
        Some(i) if i < count => Ok(i),
        _ => Err(ParseError::new(
            line,
            format!("index {raw} out of range (have {count})"),
        )),
    }
}

fn emit_triangle(
    mesh: &mut MeshData,
    positions: &[Vec3],
    uvs: &[Vec2],
    normals: &[Vec3],
    corners: [Corner; 3],
) {
    let [a, b, c] = corners.map(|corner| positions[corner.position]);
    let face_normal = normalize_or((b - a).cross(c - a), Vec3::Y);

    for corner in corners {
        let normal = corner.normal.map_or(face_normal, |i| normals[i]);
        let uv = corner.uv.map_or(Vec2::ZERO, |i| uvs[i]);
        mesh.indices.push(mesh.vertices.len() as u32);
        mesh.vertices.push(MeshVertex {
            position: positions[corner.position].to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit square facing +Y
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 1 0
g floor
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_splits_into_two_triangles() {
        let mesh = parse(QUAD).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        // Second triangle reuses the first corner.
        assert_eq!(mesh.vertices[3].position, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[5].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn texture_v_is_flipped() {
        let mesh = parse(QUAD).unwrap();
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 0.0]);
    }

    #[test]
    fn missing_normals_fall_back_to_face_normal() {
        let mesh = parse("v 0 0 0\nv 0 0 1\nv 1 0 0\nf 1 2 3\n").unwrap();
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn position_and_normal_without_uv() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[1].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn negative_indices_are_relative() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.vertices[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn pentagon_is_rejected_with_line_number() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 2 0\nf 1 2 3 4 5\n";
        let err = parse(src).unwrap_err();
        assert_eq!(err.line, 6);
        assert!(err.message.contains("5 vertices"), "{}", err.message);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = parse("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("out of range"), "{}", err.message);
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = parse("v 0 zero 0\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(Path::new("definitely/not/here.obj")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err}");
    }
}
