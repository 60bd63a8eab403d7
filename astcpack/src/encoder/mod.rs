//! The block-encoder capability boundary.
//!
//! The actual ASTC block encoder is an external engine consumed through a
//! narrow four-operation contract: build a configuration, allocate a
//! context bound to it, compress into a caller-owned destination buffer,
//! and free the context. [`BlockEncoder`] models that contract as a trait
//! so the session lifecycle and cleanup guarantees are testable without the
//! real engine:
//!
//! ```text
//! ┌──────────────────────┐
//! │   TexturePipeline    │
//! │                      │
//! │ Arc<dyn BlockEncoder>│
//! └──────────┬───────────┘
//!            │
//!       ┌────┴─────┐
//!       ▼          ▼
//! ┌───────────┐ ┌─────────────┐
//! │FakeEncoder│ │NativeEncoder│ (feature "native-encoder")
//! └───────────┘ └─────────────┘
//! ```
//!
//! Configuration and context handles are opaque to callers. Ownership of
//! pixel and destination buffers never crosses the boundary; the engine
//! only ever sees borrowed views.

mod error;
mod fake;
#[cfg(feature = "native-encoder")]
mod native;
mod session;

pub use error::EncoderError;
pub use fake::FakeEncoder;
#[cfg(feature = "native-encoder")]
pub use native::NativeEncoder;
pub use session::{EncoderJob, EncoderSession};

use std::any::Any;

use crate::astc::BlockFootprint;
use crate::raster::PixelBuffer;

/// Color-space and dynamic-range profile selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Low dynamic range, sRGB transfer function.
    #[default]
    LdrSrgb = 0,
    /// Low dynamic range, linear.
    Ldr = 1,
    /// HDR color channels with an LDR alpha channel.
    HdrRgbLdrA = 2,
    /// Full high dynamic range.
    Hdr = 3,
}

/// Component type of the pixel data handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// 8-bit unsigned normalized, the only type this pipeline feeds.
    #[default]
    U8 = 0,
    /// 16-bit float.
    F16 = 1,
    /// 32-bit float.
    F32 = 2,
}

/// Source selector for one logical channel of the swizzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelect {
    /// Input red.
    R = 0,
    /// Input green.
    G = 1,
    /// Input blue.
    B = 2,
    /// Input alpha.
    A = 3,
    /// Constant zero.
    Zero = 4,
    /// Constant one.
    One = 5,
    /// Reconstructed two-plane Z component.
    Z = 6,
}

/// Per-channel remapping applied when the engine reads pixel data.
///
/// The pipeline always uses the identity mapping; channel remapping is not
/// a configuration input of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swizzle {
    pub r: ChannelSelect,
    pub g: ChannelSelect,
    pub b: ChannelSelect,
    pub a: ChannelSelect,
}

impl Swizzle {
    /// The identity mapping: R, G, B, A read from themselves.
    pub fn identity() -> Self {
        Self {
            r: ChannelSelect::R,
            g: ChannelSelect::G,
            b: ChannelSelect::B,
            a: ChannelSelect::A,
        }
    }
}

impl Default for Swizzle {
    fn default() -> Self {
        Self::identity()
    }
}

/// Borrowed view of the pixel data handed to a compress call.
///
/// The referenced bytes stay owned by the caller and must outlive the call;
/// the engine never takes ownership.
#[derive(Debug, Clone, Copy)]
pub struct EncoderImage<'a> {
    pub dim_x: u32,
    pub dim_y: u32,
    pub dim_z: u32,
    pub data_type: DataType,
    pub data: &'a [u8],
}

impl<'a> EncoderImage<'a> {
    /// View a normalized pixel buffer as a single-slice 2D image.
    pub fn from_pixels(pixels: &'a PixelBuffer) -> Self {
        Self {
            dim_x: pixels.width(),
            dim_y: pixels.height(),
            dim_z: 1,
            data_type: DataType::U8,
            data: pixels.bytes(),
        }
    }
}

/// Opaque engine configuration, created by [`BlockEncoder::config_init`].
///
/// The session that created it owns it exclusively; it is passed by
/// reference into context allocation and never mutated afterwards.
pub struct EncoderConfig(Box<dyn Any + Send>);

impl EncoderConfig {
    /// Wrap an implementation-specific configuration value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow the implementation's configuration, if the types match.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

/// Opaque engine context, created by [`BlockEncoder::context_alloc`].
///
/// Exactly one context exists per compression job, and it must be handed
/// back to [`BlockEncoder::context_free`] exactly once on every exit path.
pub struct EncoderContext(Box<dyn Any + Send>);

impl EncoderContext {
    /// Wrap an implementation-specific context value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow the implementation's context, if the types match.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Unwrap into the boxed implementation value.
    pub fn into_any(self) -> Box<dyn Any + Send> {
        self.0
    }
}

/// The four-operation contract of an ASTC block-encoding engine.
///
/// Implementations must be thread-safe (`Send + Sync`); the context
/// contract permits one concurrent compress call per thread index when the
/// context was allocated with a matching thread count.
///
/// # Implementors
///
/// - [`FakeEncoder`] - deterministic double for tests
/// - [`NativeEncoder`] - binds the astcenc shared library (feature
///   `native-encoder`)
pub trait BlockEncoder: Send + Sync {
    /// Validate parameters and build an engine configuration.
    ///
    /// # Errors
    ///
    /// `BadParam`, `BadBlockSize`, `BadProfile`, `BadQuality`,
    /// `BadSwizzle` or `BadFlags` when the engine rejects a parameter.
    fn config_init(
        &self,
        profile: Profile,
        footprint: &BlockFootprint,
        quality: f32,
        flags: u32,
    ) -> Result<EncoderConfig, EncoderError>;

    /// Allocate a compression context bound to a configuration.
    ///
    /// Resources scale with `thread_count`; a context allocated for N
    /// threads accepts compress calls with thread indices `0..N`.
    ///
    /// # Errors
    ///
    /// `OutOfMem` or `BadContext` on allocation failure, `BadParam` for an
    /// invalid thread count or foreign configuration handle.
    fn context_alloc(
        &self,
        config: &EncoderConfig,
        thread_count: u32,
    ) -> Result<EncoderContext, EncoderError>;

    /// Compress an image into `destination`.
    ///
    /// `destination` must be exactly the capacity the block arithmetic
    /// requires; the engine is permitted to assume sufficient capacity and
    /// fills the buffer completely on success. There is no partial-fill
    /// signaling.
    fn compress(
        &self,
        context: &EncoderContext,
        image: &EncoderImage<'_>,
        swizzle: &Swizzle,
        destination: &mut [u8],
        thread_index: u32,
    ) -> Result<(), EncoderError>;

    /// Release a context. Must be called exactly once per context.
    fn context_free(&self, context: EncoderContext);
}
