//! Container assembly: header plus compressed block stream.

use super::{compressed_size, AstcError, AstcHeader, BlockFootprint, HEADER_BYTES};

/// Assemble a complete ASTC container for a compressed image.
///
/// The compressed stream is appended unmodified after the 16-byte header,
/// so the output length is always `16 + compressed.len()`. This is a pure
/// transform; writing the result anywhere is the caller's concern.
///
/// # Errors
///
/// Fails if `compressed` is not exactly the length the block arithmetic
/// requires for `width`x`height` with this footprint, or if a dimension
/// does not fit the header.
pub fn assemble(
    width: u32,
    height: u32,
    footprint: BlockFootprint,
    compressed: &[u8],
) -> Result<Vec<u8>, AstcError> {
    let expected = compressed_size(width, height, &footprint);
    if compressed.len() != expected {
        return Err(AstcError::StreamSizeMismatch {
            expected,
            actual: compressed.len(),
        });
    }

    let header = AstcHeader::new(width, height, footprint)?;
    let mut container = Vec::with_capacity(HEADER_BYTES + compressed.len());
    container.extend_from_slice(&header.to_bytes());
    container.extend_from_slice(compressed);
    Ok(container)
}
