//! Error codes reported across the encoder capability boundary.

use thiserror::Error;

/// The block-encoding engine's error codes.
///
/// Every code the engine can report has a variant here; no code is ever
/// collapsed into a generic error, so callers can surface the exact failure
/// kind upward.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError {
    /// The engine could not allocate memory.
    #[error("Encoder out of memory")]
    OutOfMem,

    /// The host's floating-point mode is incompatible with the engine.
    #[error("Host CPU floating-point mode is unsupported")]
    BadCpuFloat,

    /// An invalid parameter was passed to an engine operation.
    #[error("Invalid parameter passed to the encoder")]
    BadParam,

    /// The configured block size is not supported.
    #[error("Unsupported block size")]
    BadBlockSize,

    /// The configured color profile is not supported.
    #[error("Unsupported color profile")]
    BadProfile,

    /// The quality value is outside the supported range.
    #[error("Quality value outside the supported range")]
    BadQuality,

    /// The channel swizzle is invalid.
    #[error("Invalid channel swizzle")]
    BadSwizzle,

    /// The configuration flags are invalid or contradictory.
    #[error("Invalid configuration flags")]
    BadFlags,

    /// The context handle is invalid or belongs to another engine.
    #[error("Invalid encoder context")]
    BadContext,

    /// The requested operation is not implemented by this engine build.
    #[error("Operation not implemented by the encoder")]
    NotImplemented,

    /// The configured decode mode is not supported.
    #[error("Unsupported decode mode")]
    BadDecodeMode,
}
