//! The compression pipeline.
//!
//! One job is one linear pass:
//!
//! ```text
//! raster ──► normalize ──► estimate ──► compress ──► assemble ──► write
//!            (raster)      (astc)       (encoder)    (astc)       (sink)
//! ```
//!
//! There is no partial-success state: the first failing stage aborts the
//! job, the encoder context is still released, and no output file is
//! touched until the full container exists in memory.

mod error;
mod sink;

pub use error::PipelineError;
pub use sink::write_atomic;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::astc::{self, compressed_size};
use crate::config::EncodeConfig;
use crate::encoder::{BlockEncoder, EncoderImage, EncoderSession, Swizzle};
use crate::raster::{decode_image, PixelBuffer};

/// What a finished job produced, for caller-side reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    /// Total container bytes written (header plus block stream).
    pub bytes_written: usize,
}

/// Compresses rasters into ASTC containers using a block-encoding engine.
///
/// The pipeline holds the engine behind `Arc<dyn BlockEncoder>` so callers
/// choose the backend (the native library or the deterministic fake) at
/// construction time.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use astcpack::config::EncodeConfig;
/// use astcpack::encoder::FakeEncoder;
/// use astcpack::pipeline::TexturePipeline;
/// use astcpack::raster::PixelBuffer;
///
/// let pipeline = TexturePipeline::new(Arc::new(FakeEncoder::new()), EncodeConfig::default());
/// let raster = PixelBuffer::from_rgba8(4, 4, vec![0x80; 64]).unwrap();
///
/// let container = pipeline.compress(&raster).unwrap();
/// assert_eq!(container.len(), 16 + 16); // header + one block
/// ```
pub struct TexturePipeline {
    encoder: Arc<dyn BlockEncoder>,
    config: EncodeConfig,
}

impl TexturePipeline {
    /// Create a pipeline over the given engine and configuration.
    pub fn new(encoder: Arc<dyn BlockEncoder>, config: EncodeConfig) -> Self {
        Self { encoder, config }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Compress a raster into a complete ASTC container in memory.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error; see [`PipelineError`]. The
    /// encoder context is released before this function returns, on every
    /// path.
    pub fn compress(&self, raster: &PixelBuffer) -> Result<Vec<u8>, PipelineError> {
        let pixels = raster.normalize();
        let footprint = self.config.footprint();
        let capacity = compressed_size(pixels.width(), pixels.height(), &footprint);
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            %footprint,
            capacity,
            "Estimated compressed size"
        );

        let session = EncoderSession::configure(
            Arc::clone(&self.encoder),
            self.config.profile(),
            footprint,
            self.config.quality(),
            self.config.flags(),
        )
        .map_err(PipelineError::Configuration)?;

        let mut destination = vec![0u8; capacity];
        {
            let job = session
                .begin(self.config.thread_count())
                .map_err(PipelineError::Resource)?;
            job.compress(
                &EncoderImage::from_pixels(&pixels),
                &Swizzle::identity(),
                &mut destination,
                0,
            )
            .map_err(PipelineError::Compression)?;
            // job drops here: the context is released before assembly
        }

        let container = astc::assemble(pixels.width(), pixels.height(), footprint, &destination)?;
        Ok(container)
    }

    /// Run a complete job: decode, compress, and write the output file.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error. Nothing is written to `output`
    /// unless every prior stage succeeded.
    pub fn run(&self, input: &Path, output: &Path) -> Result<EncodeSummary, PipelineError> {
        let raster = decode_image(input, self.config.flip_vertically())?;
        info!(
            input = %input.display(),
            width = raster.width(),
            height = raster.height(),
            "Loaded source image"
        );

        let started = Instant::now();
        let container = self.compress(&raster)?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = container.len(),
            "Compression complete"
        );

        write_atomic(output, &container)?;
        info!(output = %output.display(), "Wrote ASTC container");

        Ok(EncodeSummary {
            width: raster.width(),
            height: raster.height(),
            bytes_written: container.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astc::{BlockFootprint, ASTC_MAGIC, HEADER_BYTES};
    use crate::encoder::{EncoderError, FakeEncoder};

    fn pipeline_with(encoder: Arc<FakeEncoder>) -> TexturePipeline {
        TexturePipeline::new(encoder, EncodeConfig::default())
    }

    #[test]
    fn test_compress_produces_header_and_blocks() {
        let encoder = Arc::new(FakeEncoder::new().with_block_pattern([0x42; 16]));
        let pipeline = pipeline_with(Arc::clone(&encoder));
        let raster = PixelBuffer::from_rgba8(4, 4, vec![0x10; 64]).unwrap();

        let container = pipeline.compress(&raster).unwrap();
        assert_eq!(container.len(), 32);
        assert_eq!(&container[0..4], &ASTC_MAGIC);
        assert_eq!(&container[HEADER_BYTES..], &[0x42; 16]);
    }

    #[test]
    fn test_compress_length_matches_estimate() {
        let footprint = BlockFootprint::new(6, 6).unwrap();
        let pipeline = TexturePipeline::new(
            Arc::new(FakeEncoder::new()),
            EncodeConfig::new(footprint),
        );
        let raster = PixelBuffer::from_rgba8(10, 7, vec![0; 10 * 7 * 4]).unwrap();

        let container = pipeline.compress(&raster).unwrap();
        let expected = compressed_size(10, 7, &footprint);
        assert_eq!(container.len(), HEADER_BYTES + expected);
    }

    #[test]
    fn test_configuration_failure_allocates_nothing() {
        let encoder = Arc::new(FakeEncoder::new().with_config_error(EncoderError::BadProfile));
        let pipeline = pipeline_with(Arc::clone(&encoder));
        let raster = PixelBuffer::from_rgba8(4, 4, vec![0; 64]).unwrap();

        let result = pipeline.compress(&raster);
        assert!(matches!(
            result,
            Err(PipelineError::Configuration(EncoderError::BadProfile))
        ));
        assert_eq!(encoder.contexts_allocated(), 0);
    }

    #[test]
    fn test_alloc_failure_is_a_resource_error() {
        let encoder = Arc::new(FakeEncoder::new().with_alloc_error(EncoderError::OutOfMem));
        let pipeline = pipeline_with(Arc::clone(&encoder));
        let raster = PixelBuffer::from_rgba8(4, 4, vec![0; 64]).unwrap();

        let result = pipeline.compress(&raster);
        assert!(matches!(
            result,
            Err(PipelineError::Resource(EncoderError::OutOfMem))
        ));
    }

    #[test]
    fn test_compress_failure_still_releases_context() {
        let encoder = Arc::new(FakeEncoder::new().with_compress_error(EncoderError::BadParam));
        let pipeline = pipeline_with(Arc::clone(&encoder));
        let raster = PixelBuffer::from_rgba8(4, 4, vec![0; 64]).unwrap();

        let result = pipeline.compress(&raster);
        assert!(matches!(
            result,
            Err(PipelineError::Compression(EncoderError::BadParam))
        ));
        assert_eq!(encoder.contexts_allocated(), 1);
        assert_eq!(encoder.contexts_freed(), 1);
    }

    #[test]
    fn test_successful_job_releases_context() {
        let encoder = Arc::new(FakeEncoder::new());
        let pipeline = pipeline_with(Arc::clone(&encoder));
        let raster = PixelBuffer::from_rgba8(8, 8, vec![0; 256]).unwrap();

        pipeline.compress(&raster).unwrap();
        assert_eq!(encoder.contexts_allocated(), 1);
        assert_eq!(encoder.contexts_freed(), 1);
    }

    #[test]
    fn test_bottom_up_raster_is_normalized_before_compression() {
        // The fake fills the destination regardless of content; this checks
        // the pipeline accepts non-normalized input shapes.
        use crate::raster::{ChannelOrder, RowOrigin};
        let pipeline = pipeline_with(Arc::new(FakeEncoder::new()));
        let raster = PixelBuffer::new(
            4,
            4,
            ChannelOrder::Bgra,
            RowOrigin::BottomUp,
            vec![0x33; 64],
        )
        .unwrap();

        let container = pipeline.compress(&raster).unwrap();
        assert_eq!(container.len(), 32);
    }
}
