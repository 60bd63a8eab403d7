//! Error types for raster loading and normalization.

use thiserror::Error;

/// Errors that can occur while building or decoding a pixel buffer.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The byte buffer does not match `width * height * 4`.
    #[error("Pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The source image could not be decoded.
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),
}
