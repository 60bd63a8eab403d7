//! Block footprint and compressed-size arithmetic.
//!
//! ASTC encodes a fixed 16-byte payload per block regardless of the block's
//! pixel footprint, so the compressed size of an image depends only on how
//! many whole blocks cover it.

use std::fmt;

use super::AstcError;

/// Bytes per compressed ASTC block, independent of footprint.
pub const BLOCK_BYTES: usize = 16;

/// The 2D block footprints the ASTC format defines.
const VALID_2D_FOOTPRINTS: [(u32, u32); 14] = [
    (4, 4),
    (5, 4),
    (5, 5),
    (6, 5),
    (6, 6),
    (8, 5),
    (8, 6),
    (8, 8),
    (10, 5),
    (10, 6),
    (10, 8),
    (10, 10),
    (12, 10),
    (12, 12),
];

/// Pixel dimensions covered by one compressed block.
///
/// Only 2D footprints are supported; `depth` is always 1. Volumetric block
/// footprints are rejected at construction rather than silently accepted.
///
/// # Example
///
/// ```
/// use astcpack::astc::BlockFootprint;
///
/// let footprint = BlockFootprint::new(6, 6).unwrap();
/// assert_eq!(footprint.width(), 6);
/// assert_eq!(footprint.depth(), 1);
/// assert!(BlockFootprint::new(7, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFootprint {
    width: u32,
    height: u32,
    depth: u32,
}

impl BlockFootprint {
    /// Create a 2D block footprint.
    ///
    /// # Errors
    ///
    /// Returns `AstcError::UnsupportedFootprint` if `width`x`height` is not
    /// one of the block sizes the ASTC format defines.
    pub fn new(width: u32, height: u32) -> Result<Self, AstcError> {
        if !VALID_2D_FOOTPRINTS.contains(&(width, height)) {
            return Err(AstcError::UnsupportedFootprint {
                width,
                height,
                depth: 1,
            });
        }
        Ok(Self {
            width,
            height,
            depth: 1,
        })
    }

    /// Block width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Block height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Block depth in pixels (always 1 for 2D footprints).
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Default for BlockFootprint {
    /// 4x4, the finest footprint (8 bits per pixel).
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            depth: 1,
        }
    }
}

impl fmt::Display for BlockFootprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Exact size in bytes of the compressed stream for an image.
///
/// Computes `ceil(width / block_width) * ceil(height / block_height) * 16`.
/// The result must be used verbatim as the destination-buffer capacity for
/// the encoder; it contains no slack beyond whole-block coverage.
///
/// # Example
///
/// ```
/// use astcpack::astc::{compressed_size, BlockFootprint};
///
/// let footprint = BlockFootprint::new(4, 4).unwrap();
/// assert_eq!(compressed_size(2048, 2048, &footprint), 4_194_304);
/// ```
pub fn compressed_size(width: u32, height: u32, footprint: &BlockFootprint) -> usize {
    let blocks_wide = width.div_ceil(footprint.width) as usize;
    let blocks_high = height.div_ceil(footprint.height) as usize;
    blocks_wide * blocks_high * BLOCK_BYTES
}
