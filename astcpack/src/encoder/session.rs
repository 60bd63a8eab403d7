//! Encoder session lifecycle.
//!
//! A session walks the engine through its states in order: configuration
//! ([`EncoderSession::configure`]), context allocation
//! ([`EncoderSession::begin`]), compression ([`EncoderJob::compress`]) and
//! release. Release is not left to call sites: the job guards
//! the context and frees it when dropped, so every exit path (normal
//! return, early `?`, or propagated failure) releases exactly once.
//!
//! Every error is terminal for the current job. Nothing here retries; the
//! specific [`EncoderError`] kind propagates to the caller unchanged.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::astc::{compressed_size, BlockFootprint};

use super::{
    BlockEncoder, EncoderConfig, EncoderContext, EncoderError, EncoderImage, Profile, Swizzle,
};

/// Quality values the engine accepts, inclusive.
const QUALITY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;

/// A configured encoder, ready to allocate compression contexts.
pub struct EncoderSession {
    encoder: Arc<dyn BlockEncoder>,
    config: EncoderConfig,
    footprint: BlockFootprint,
}

impl EncoderSession {
    /// Validate parameters and build the engine configuration.
    ///
    /// # Errors
    ///
    /// `BadQuality` if `quality` is outside `0.0..=100.0` (checked before
    /// the engine is invoked), or whatever the engine reports for the
    /// remaining parameters.
    pub fn configure(
        encoder: Arc<dyn BlockEncoder>,
        profile: Profile,
        footprint: BlockFootprint,
        quality: f32,
        flags: u32,
    ) -> Result<Self, EncoderError> {
        if !QUALITY_RANGE.contains(&quality) {
            return Err(EncoderError::BadQuality);
        }

        let config = encoder.config_init(profile, &footprint, quality, flags)?;
        debug!(%footprint, ?profile, quality, flags, "Encoder configured");
        Ok(Self {
            encoder,
            config,
            footprint,
        })
    }

    /// The block footprint this session was configured with.
    pub fn footprint(&self) -> BlockFootprint {
        self.footprint
    }

    /// Allocate a context and begin a compression job.
    ///
    /// The returned job releases the context when dropped, whether or not
    /// compression ran or succeeded.
    ///
    /// # Errors
    ///
    /// `BadParam` for a zero `thread_count`; otherwise the engine's
    /// allocation error (`OutOfMem`, `BadContext`).
    pub fn begin(&self, thread_count: u32) -> Result<EncoderJob<'_>, EncoderError> {
        if thread_count == 0 {
            return Err(EncoderError::BadParam);
        }

        let context = self.encoder.context_alloc(&self.config, thread_count)?;
        trace!(thread_count, "Encoder context allocated");
        Ok(EncoderJob {
            encoder: self.encoder.as_ref(),
            footprint: self.footprint,
            context: Some(context),
        })
    }
}

/// A compression job holding the one live encoder context.
///
/// Dropping the job frees the context; it cannot leak or be freed twice.
pub struct EncoderJob<'a> {
    encoder: &'a dyn BlockEncoder,
    footprint: BlockFootprint,
    context: Option<EncoderContext>,
}

impl EncoderJob<'_> {
    /// Compress `image` into `destination`.
    ///
    /// `destination.len()` must equal the exact compressed size for the
    /// image dimensions and the session's footprint; a mismatch is a
    /// `BadParam` precondition violation detected before the engine runs.
    /// On success the entire destination holds valid output.
    ///
    /// `thread_index` must be below the thread count the context was
    /// allocated with; this crate's pipeline always passes 0.
    pub fn compress(
        &self,
        image: &EncoderImage<'_>,
        swizzle: &Swizzle,
        destination: &mut [u8],
        thread_index: u32,
    ) -> Result<(), EncoderError> {
        let expected = compressed_size(image.dim_x, image.dim_y, &self.footprint);
        if destination.len() != expected {
            return Err(EncoderError::BadParam);
        }

        let Some(context) = self.context.as_ref() else {
            return Err(EncoderError::BadContext);
        };
        self.encoder
            .compress(context, image, swizzle, destination, thread_index)
    }
}

impl Drop for EncoderJob<'_> {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            self.encoder.context_free(context);
            trace!("Encoder context released");
        }
    }
}
