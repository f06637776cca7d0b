//! Image decoding behind the external-decoder seam.
//!
//! The renderer only needs `path -> {width, height, RGBA bytes}`; where
//! those bytes come from is a detail of the host application. The default
//! [`FileImageDecoder`] reads files relative to a resource root and decodes
//! them with the `image` crate.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// An image file could not be turned into RGBA pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not read image file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported or corrupt image data in {path}")]
    Undecodable {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Clone, Debug)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub rgba: Vec<u8>,
}

/// The external image decoder seam.
pub trait ImageDecoder {
    fn decode(&self, path: &str) -> Result<ImageData, DecodeError>;
}

/// Decodes image files from disk below a fixed resource root.
#[derive(Clone, Debug)]
pub struct FileImageDecoder {
    root: PathBuf,
}

impl FileImageDecoder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &str) -> Result<ImageData, DecodeError> {
        let full_path = self.root.join(path);
        let bytes = fs::read(&full_path).map_err(|source| DecodeError::Unreadable {
            path: full_path.display().to_string(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| DecodeError::Undecodable {
            path: full_path.display().to_string(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        Ok(ImageData {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}
