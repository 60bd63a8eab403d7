//! Pipeline error taxonomy.

use thiserror::Error;

use crate::astc::AstcError;
use crate::encoder::EncoderError;
use crate::raster::RasterError;

/// Errors from a compression job, by failing stage.
///
/// Nothing is recovered locally; the first failing stage aborts the job
/// and its error is carried here verbatim, so the encoder variants keep
/// the engine's exact error kind.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading or validating the source raster failed.
    #[error("Failed to load source image: {0}")]
    Raster(#[from] RasterError),

    /// The engine rejected the configuration parameters.
    #[error("Encoder rejected the configuration: {0}")]
    Configuration(EncoderError),

    /// Context allocation failed.
    #[error("Failed to allocate encoder resources: {0}")]
    Resource(EncoderError),

    /// The compress operation failed.
    #[error("Compression failed: {0}")]
    Compression(EncoderError),

    /// Container assembly failed.
    #[error("Failed to assemble ASTC container: {0}")]
    Container(#[from] AstcError),

    /// Writing the output file failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
