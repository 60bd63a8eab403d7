//! Deterministic encoder double.
//!
//! `FakeEncoder` stands in for the native engine in tests: it fills the
//! destination with a fixed block pattern, can be told to fail any of the
//! four operations with a chosen error code, and counts context
//! allocations and releases so lifecycle invariants are assertable.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::astc::{BlockFootprint, BLOCK_BYTES};

use super::{
    BlockEncoder, EncoderConfig, EncoderContext, EncoderError, EncoderImage, Profile, Swizzle,
};

/// Configuration handle contents for the fake engine.
#[derive(Debug, Clone, Copy)]
struct FakeConfig {
    #[allow(dead_code)]
    profile: Profile,
    block_width: u32,
    block_height: u32,
}

/// Context handle contents for the fake engine.
#[derive(Debug, Clone, Copy)]
struct FakeContext {
    thread_count: u32,
    block_width: u32,
    block_height: u32,
}

/// A deterministic [`BlockEncoder`] double.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use astcpack::astc::BlockFootprint;
/// use astcpack::encoder::{BlockEncoder, EncoderError, EncoderSession, FakeEncoder, Profile};
///
/// let encoder = Arc::new(FakeEncoder::new().with_alloc_error(EncoderError::OutOfMem));
/// let session = EncoderSession::configure(
///     Arc::clone(&encoder) as Arc<dyn BlockEncoder>,
///     Profile::LdrSrgb,
///     BlockFootprint::default(),
///     60.0,
///     0,
/// )
/// .unwrap();
/// assert!(session.begin(1).is_err());
/// assert_eq!(encoder.contexts_allocated(), 0);
/// ```
pub struct FakeEncoder {
    pattern: [u8; BLOCK_BYTES],
    config_error: Option<EncoderError>,
    alloc_error: Option<EncoderError>,
    compress_error: Option<EncoderError>,
    contexts_allocated: AtomicUsize,
    contexts_freed: AtomicUsize,
    compress_calls: AtomicUsize,
}

impl FakeEncoder {
    pub fn new() -> Self {
        Self {
            pattern: [
                0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF, 0xDE,
                0xAD, 0xBE, 0xEF,
            ],
            config_error: None,
            alloc_error: None,
            compress_error: None,
            contexts_allocated: AtomicUsize::new(0),
            contexts_freed: AtomicUsize::new(0),
            compress_calls: AtomicUsize::new(0),
        }
    }

    /// Use a custom 16-byte block pattern for compressed output.
    pub fn with_block_pattern(mut self, pattern: [u8; BLOCK_BYTES]) -> Self {
        self.pattern = pattern;
        self
    }

    /// Fail `config_init` with the given error.
    pub fn with_config_error(mut self, error: EncoderError) -> Self {
        self.config_error = Some(error);
        self
    }

    /// Fail `context_alloc` with the given error.
    pub fn with_alloc_error(mut self, error: EncoderError) -> Self {
        self.alloc_error = Some(error);
        self
    }

    /// Fail `compress` with the given error.
    pub fn with_compress_error(mut self, error: EncoderError) -> Self {
        self.compress_error = Some(error);
        self
    }

    /// Number of contexts handed out so far.
    pub fn contexts_allocated(&self) -> usize {
        self.contexts_allocated.load(Ordering::SeqCst)
    }

    /// Number of contexts released so far.
    pub fn contexts_freed(&self) -> usize {
        self.contexts_freed.load(Ordering::SeqCst)
    }

    /// Number of compress calls that reached the engine.
    pub fn compress_calls(&self) -> usize {
        self.compress_calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEncoder for FakeEncoder {
    fn config_init(
        &self,
        profile: Profile,
        footprint: &BlockFootprint,
        _quality: f32,
        _flags: u32,
    ) -> Result<EncoderConfig, EncoderError> {
        if let Some(error) = self.config_error {
            return Err(error);
        }
        Ok(EncoderConfig::new(FakeConfig {
            profile,
            block_width: footprint.width(),
            block_height: footprint.height(),
        }))
    }

    fn context_alloc(
        &self,
        config: &EncoderConfig,
        thread_count: u32,
    ) -> Result<EncoderContext, EncoderError> {
        if let Some(error) = self.alloc_error {
            return Err(error);
        }
        let Some(fake_config) = config.downcast_ref::<FakeConfig>() else {
            return Err(EncoderError::BadParam);
        };
        if thread_count == 0 {
            return Err(EncoderError::BadParam);
        }
        self.contexts_allocated.fetch_add(1, Ordering::SeqCst);
        Ok(EncoderContext::new(FakeContext {
            thread_count,
            block_width: fake_config.block_width,
            block_height: fake_config.block_height,
        }))
    }

    fn compress(
        &self,
        context: &EncoderContext,
        image: &EncoderImage<'_>,
        _swizzle: &Swizzle,
        destination: &mut [u8],
        thread_index: u32,
    ) -> Result<(), EncoderError> {
        let Some(fake_context) = context.downcast_ref::<FakeContext>() else {
            return Err(EncoderError::BadContext);
        };
        if thread_index >= fake_context.thread_count {
            return Err(EncoderError::BadParam);
        }
        if image.data.len() != image.dim_x as usize * image.dim_y as usize * 4 {
            return Err(EncoderError::BadParam);
        }
        let blocks_wide = image.dim_x.div_ceil(fake_context.block_width) as usize;
        let blocks_high = image.dim_y.div_ceil(fake_context.block_height) as usize;
        if destination.len() != blocks_wide * blocks_high * BLOCK_BYTES {
            return Err(EncoderError::BadParam);
        }

        self.compress_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.compress_error {
            return Err(error);
        }

        for chunk in destination.chunks_mut(BLOCK_BYTES) {
            chunk.copy_from_slice(&self.pattern[..chunk.len()]);
        }
        Ok(())
    }

    fn context_free(&self, _context: EncoderContext) {
        self.contexts_freed.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::DataType;

    fn fake_config(encoder: &FakeEncoder) -> EncoderConfig {
        encoder
            .config_init(Profile::LdrSrgb, &BlockFootprint::default(), 60.0, 0)
            .unwrap()
    }

    #[test]
    fn test_compress_fills_destination_with_pattern() {
        let encoder = FakeEncoder::new().with_block_pattern([0x11; BLOCK_BYTES]);
        let config = fake_config(&encoder);
        let context = encoder.context_alloc(&config, 1).unwrap();

        let data = vec![0u8; 4 * 4 * 4];
        let image = EncoderImage {
            dim_x: 4,
            dim_y: 4,
            dim_z: 1,
            data_type: DataType::U8,
            data: &data,
        };
        let mut destination = vec![0u8; 16];
        encoder
            .compress(&context, &image, &Swizzle::identity(), &mut destination, 0)
            .unwrap();
        assert_eq!(destination, vec![0x11; 16]);

        encoder.context_free(context);
    }

    #[test]
    fn test_foreign_context_is_rejected() {
        let encoder = FakeEncoder::new();
        let foreign = EncoderContext::new("not a fake context");

        let data = vec![0u8; 16];
        let image = EncoderImage {
            dim_x: 2,
            dim_y: 2,
            dim_z: 1,
            data_type: DataType::U8,
            data: &data,
        };
        let mut destination = vec![0u8; 16];
        let result = encoder.compress(&foreign, &image, &Swizzle::identity(), &mut destination, 0);
        assert!(matches!(result, Err(EncoderError::BadContext)));
    }

    #[test]
    fn test_foreign_config_is_rejected() {
        let encoder = FakeEncoder::new();
        let foreign = EncoderConfig::new(123u64);
        let result = encoder.context_alloc(&foreign, 1);
        assert!(matches!(result, Err(EncoderError::BadParam)));
    }

    #[test]
    fn test_thread_index_must_match_context() {
        let encoder = FakeEncoder::new();
        let config = fake_config(&encoder);
        let context = encoder.context_alloc(&config, 2).unwrap();

        let data = vec![0u8; 4 * 4 * 4];
        let image = EncoderImage {
            dim_x: 4,
            dim_y: 4,
            dim_z: 1,
            data_type: DataType::U8,
            data: &data,
        };
        let mut destination = vec![0u8; 16];
        assert!(encoder
            .compress(&context, &image, &Swizzle::identity(), &mut destination, 1)
            .is_ok());
        let result = encoder.compress(&context, &image, &Swizzle::identity(), &mut destination, 2);
        assert!(matches!(result, Err(EncoderError::BadParam)));

        encoder.context_free(context);
    }

    #[test]
    fn test_counters_track_lifecycle() {
        let encoder = FakeEncoder::new();
        let config = fake_config(&encoder);

        let first = encoder.context_alloc(&config, 1).unwrap();
        let second = encoder.context_alloc(&config, 1).unwrap();
        assert_eq!(encoder.contexts_allocated(), 2);
        assert_eq!(encoder.contexts_freed(), 0);

        encoder.context_free(first);
        encoder.context_free(second);
        assert_eq!(encoder.contexts_freed(), 2);
    }
}
