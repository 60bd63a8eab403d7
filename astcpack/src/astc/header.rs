//! The fixed 16-byte ASTC file header.
//!
//! The header layout is the one conventional ASTC tooling expects:
//!
//! ```text
//! offset 0..3   magic 0x5CA1AB13 (bytes 0x13 0xAB 0xA1 0x5C)
//! offset 4      block width  (u8)
//! offset 5      block height (u8)
//! offset 6      block depth  (u8)
//! offset 7..9   image width  (24-bit little-endian)
//! offset 10..12 image height (24-bit little-endian)
//! offset 13..15 image depth  (24-bit little-endian)
//! ```

use super::{AstcError, BlockFootprint};

/// The ASTC file magic, already in serialized byte order.
pub const ASTC_MAGIC: [u8; 4] = [0x13, 0xAB, 0xA1, 0x5C];

/// Serialized header size in bytes.
pub const HEADER_BYTES: usize = 16;

/// Largest dimension the header's 24-bit fields can carry.
const MAX_DIMENSION: u32 = (1 << 24) - 1;

/// The container header for a single 2D ASTC image.
///
/// Image depth is fixed at 1; multi-slice volumetric containers are not
/// produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstcHeader {
    footprint: BlockFootprint,
    width: u32,
    height: u32,
    depth: u32,
}

impl AstcHeader {
    /// Create a header for a `width`x`height` image.
    ///
    /// # Errors
    ///
    /// Returns `AstcError::DimensionTooLarge` if either dimension cannot be
    /// represented in the header's 24-bit fields. Dimensions are never
    /// silently truncated.
    pub fn new(width: u32, height: u32, footprint: BlockFootprint) -> Result<Self, AstcError> {
        for value in [width, height] {
            if value > MAX_DIMENSION {
                return Err(AstcError::DimensionTooLarge { value });
            }
        }
        Ok(Self {
            footprint,
            width,
            height,
            depth: 1,
        })
    }

    /// Serialize to the fixed 16-byte wire layout.
    pub fn to_bytes(&self) -> [u8; HEADER_BYTES] {
        let mut bytes = [0u8; HEADER_BYTES];
        bytes[0..4].copy_from_slice(&ASTC_MAGIC);
        bytes[4] = self.footprint.width() as u8;
        bytes[5] = self.footprint.height() as u8;
        bytes[6] = self.footprint.depth() as u8;
        bytes[7..10].copy_from_slice(&encode_u24(self.width));
        bytes[10..13].copy_from_slice(&encode_u24(self.height));
        bytes[13..16].copy_from_slice(&encode_u24(self.depth));
        bytes
    }
}

/// Low three bytes of `value`, little-endian.
fn encode_u24(value: u32) -> [u8; 3] {
    [value as u8, (value >> 8) as u8, (value >> 16) as u8]
}
