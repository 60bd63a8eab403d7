//! astcpack - ASTC texture compression pipeline
//!
//! This library turns a decoded RGBA raster into an ASTC-compressed texture
//! container: it normalizes the pixel buffer to top-down RGBA, computes the
//! exact destination size the block encoder requires, drives the encoder
//! through its configure/allocate/compress/release lifecycle, and assembles
//! the 16-byte container header with the compressed block stream.
//!
//! The block-encoding engine itself is external, consumed through the
//! [`encoder::BlockEncoder`] trait. Builds without the `native-encoder`
//! feature still carry the full pipeline, exercised by the deterministic
//! [`encoder::FakeEncoder`].

pub mod astc;
pub mod config;
pub mod encoder;
pub mod pipeline;
pub mod raster;

pub use config::EncodeConfig;
pub use pipeline::{EncodeSummary, PipelineError, TexturePipeline};

/// Library version, from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }
}
