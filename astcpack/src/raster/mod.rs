//! Decoded raster model and pixel-buffer normalization.
//!
//! A [`PixelBuffer`] is a tightly packed 4-byte-per-pixel raster plus the
//! metadata needed to interpret it: which byte of a pixel holds which
//! channel ([`ChannelOrder`]) and whether row 0 is the top or the bottom of
//! the image ([`RowOrigin`]). The encoder consumes exactly one shape,
//! top-down RGBA, and [`PixelBuffer::normalize`] produces it from any
//! supported interpretation in a single pass.
//!
//! No stride other than `width * 4` is supported; decoders that pad rows
//! must repack before constructing a buffer.

mod decode;
mod error;

pub use decode::decode_image;
pub use error::RasterError;

/// Bytes per pixel in every buffer this crate handles.
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte layout of one pixel in memory.
///
/// Variants name the actual in-memory byte order, lowest offset first.
/// Note that GDI-style "32bpp ARGB" bitmaps are little-endian and store
/// their pixels as `Bgra` in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// R, G, B, A, the normalized order.
    Rgba,
    /// A, R, G, B.
    Argb,
    /// B, G, R, A.
    Bgra,
    /// A, B, G, R.
    Abgr,
}

impl ChannelOrder {
    /// Source byte offset of each output channel, in R, G, B, A order.
    fn swizzle(self) -> [usize; 4] {
        match self {
            ChannelOrder::Rgba => [0, 1, 2, 3],
            ChannelOrder::Argb => [1, 2, 3, 0],
            ChannelOrder::Bgra => [2, 1, 0, 3],
            ChannelOrder::Abgr => [3, 2, 1, 0],
        }
    }
}

/// Which end of the image row 0 of the buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    /// Row 0 is the top row.
    TopDown,
    /// Row 0 is the bottom row.
    BottomUp,
}

/// A decoded raster: tightly packed pixels plus interpretation metadata.
///
/// The buffer invariant `bytes.len() == width * height * 4` holds for every
/// constructed value. `channel_order` and `row_origin` describe how the
/// bytes are to be read; they never imply padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channel_order: ChannelOrder,
    row_origin: RowOrigin,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Create a pixel buffer, validating the size invariant.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::SizeMismatch` if `bytes.len()` is not exactly
    /// `width * height * 4`.
    pub fn new(
        width: u32,
        height: u32,
        channel_order: ChannelOrder,
        row_origin: RowOrigin,
        bytes: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(RasterError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channel_order,
            row_origin,
            bytes,
        })
    }

    /// Create a top-down RGBA buffer (the normalized interpretation).
    pub fn from_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, RasterError> {
        Self::new(width, height, ChannelOrder::Rgba, RowOrigin::TopDown, bytes)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte layout of each pixel.
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Row orientation of the buffer.
    pub fn row_origin(&self) -> RowOrigin {
        self.row_origin
    }

    /// The raw pixel bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Produce a top-down RGBA copy of this buffer.
    ///
    /// Rows of a bottom-up source are reversed (output row `i` is source row
    /// `height - 1 - i`) and each pixel's channels are reordered per the
    /// source layout's swizzle table. The result is always newly allocated;
    /// the source buffer is left untouched. A 0x0 buffer normalizes to an
    /// empty buffer.
    pub fn normalize(&self) -> PixelBuffer {
        let row_len = self.width as usize * BYTES_PER_PIXEL;
        let height = self.height as usize;
        let swizzle = self.channel_order.swizzle();
        let mut bytes = vec![0u8; self.bytes.len()];

        for row in 0..height {
            let source_row = match self.row_origin {
                RowOrigin::TopDown => row,
                RowOrigin::BottomUp => height - 1 - row,
            };
            let source = &self.bytes[source_row * row_len..][..row_len];
            let target = &mut bytes[row * row_len..][..row_len];
            for (out, pixel) in target
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(source.chunks_exact(BYTES_PER_PIXEL))
            {
                out[0] = pixel[swizzle[0]];
                out[1] = pixel[swizzle[1]];
                out[2] = pixel[swizzle[2]];
                out[3] = pixel[swizzle[3]];
            }
        }

        PixelBuffer {
            width: self.width,
            height: self.height,
            channel_order: ChannelOrder::Rgba,
            row_origin: RowOrigin::TopDown,
            bytes,
        }
    }
}
