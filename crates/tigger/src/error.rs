//! Crate-wide error type.
//!
//! Simulation code never fails at runtime; errors only arise at the edges:
//! reading configuration, loading assets, bringing up the GPU, and rejecting
//! degenerate entity construction (a zero scale component would make the
//! inverse-model matrix blow up).

use std::fmt;
use std::path::PathBuf;

use crate::entity::Kind;

/// Errors produced while configuring, loading, or constructing the scene.
#[derive(Debug)]
pub enum Error {
    /// Reading a file from disk failed.
    Io { path: PathBuf, source: std::io::Error },
    /// An OBJ file contained a line we could not understand.
    ObjParse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// Decoding a texture image failed.
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Importing a glTF/GLB file failed.
    #[cfg(feature = "gltf")]
    Gltf { path: PathBuf, source: gltf::Error },
    /// The configuration file is not valid JSON for [`GameConfig`](crate::config::GameConfig).
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// An entity was constructed with a zero scale component.
    ZeroScale { kind: Kind },
    /// A mesh file produced no triangles.
    EmptyMesh { path: PathBuf },
    /// GPU adapter, device, or surface setup failed.
    Gpu(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "failed to read '{}': {source}", path.display()),
            Error::ObjParse {
                path,
                line,
                message,
            } => write!(f, "{}:{line}: {message}", path.display()),
            Error::Image { path, source } => {
                write!(f, "failed to decode image '{}': {source}", path.display())
            }
            #[cfg(feature = "gltf")]
            Error::Gltf { path, source } => {
                write!(f, "failed to import glTF '{}': {source}", path.display())
            }
            Error::Config { path, source } => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
            Error::ZeroScale { kind } => write!(f, "{kind:?} entity has a zero scale component"),
            Error::EmptyMesh { path } => write!(f, "mesh '{}' has no triangles", path.display()),
            Error::Gpu(e) => write!(f, "gpu setup failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Image { source, .. } => Some(source),
            #[cfg(feature = "gltf")]
            Error::Gltf { source, .. } => Some(source),
            Error::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_parse_error_names_file_and_line() {
        let err = Error::ObjParse {
            path: PathBuf::from("assets/sphere.obj"),
            line: 12,
            message: "face has 5 vertices".into(),
        };
        assert_eq!(err.to_string(), "assets/sphere.obj:12: face has 5 vertices");
    }

    #[test]
    fn io_error_exposes_source() {
        let err = Error::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing.json"));
    }
}
