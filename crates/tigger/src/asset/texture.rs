//! Decoded texture pixels, ready for upload.

use std::path::Path;

use crate::error::{Error, Result};

/// Tightly packed RGBA8 pixels, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// A single pixel of `color`. Stands in for a texture that failed to load.
    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: color.to_vec(),
        }
    }
}

/// Decode a PNG or JPEG file.
pub fn load(path: &Path) -> Result<TextureData> {
    let img = image::open(path)
        .map_err(|source| Error::Image {
            path: path.to_owned(),
            source,
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(TextureData {
        width,
        height,
        rgba: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_is_one_pixel() {
        let tex = TextureData::solid([1, 2, 3, 4]);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.rgba, vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = load(Path::new("no/such/grass.png")).unwrap_err();
        assert!(matches!(err, Error::Image { .. }), "got {err}");
    }
}
