//! Source image decoding via the `image` crate.

use std::path::Path;

use tracing::debug;

use super::{ChannelOrder, PixelBuffer, RasterError, RowOrigin};

/// Decode an image file into a pixel buffer.
///
/// Any format the `image` crate recognizes is accepted; pixels are expanded
/// to RGBA8. The decoder produces top-down rows. Setting `flip_vertically`
/// marks the buffer bottom-up instead, so normalization reverses the rows
/// for engines that sample textures with an inverted V axis.
///
/// # Errors
///
/// Returns `RasterError::Decode` if the file cannot be read or decoded.
pub fn decode_image(path: &Path, flip_vertically: bool) -> Result<PixelBuffer, RasterError> {
    let decoded = image::open(path)?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    let row_origin = if flip_vertically {
        RowOrigin::BottomUp
    } else {
        RowOrigin::TopDown
    };
    debug!(width, height, ?row_origin, "Decoded source image");

    PixelBuffer::new(width, height, ChannelOrder::Rgba, row_origin, rgba.into_raw())
}
