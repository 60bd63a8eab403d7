//! Error types for ASTC container construction.

use thiserror::Error;

/// Errors that can occur while building an ASTC container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstcError {
    /// The block footprint is not one of the legal 2D ASTC block sizes.
    #[error("Unsupported ASTC block footprint {width}x{height}x{depth}")]
    UnsupportedFootprint { width: u32, height: u32, depth: u32 },

    /// An image dimension does not fit the header's 24-bit fields.
    #[error("Image dimension {value} exceeds the 24-bit container limit")]
    DimensionTooLarge { value: u32 },

    /// The compressed stream length does not match the size the block
    /// arithmetic requires for the given image and footprint.
    #[error("Compressed stream is {actual} bytes, expected {expected}")]
    StreamSizeMismatch { expected: usize, actual: usize },
}
