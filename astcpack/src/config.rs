//! Encoding configuration.
//!
//! `EncodeConfig` combines everything a compression job needs to know:
//! color profile, block footprint, search quality, engine flags, the
//! vertical-flip switch and the context thread count.

use crate::astc::BlockFootprint;
use crate::encoder::Profile;

/// Quality values matching the native engine's search-effort presets.
pub mod quality {
    pub const FASTEST: f32 = 0.0;
    pub const FAST: f32 = 10.0;
    pub const MEDIUM: f32 = 60.0;
    pub const THOROUGH: f32 = 98.0;
    pub const EXHAUSTIVE: f32 = 100.0;
}

/// Configuration for one compression job.
///
/// # Example
///
/// ```
/// use astcpack::astc::BlockFootprint;
/// use astcpack::config::{quality, EncodeConfig};
/// use astcpack::encoder::Profile;
///
/// let config = EncodeConfig::new(BlockFootprint::new(6, 6).unwrap())
///     .with_profile(Profile::Ldr)
///     .with_quality(quality::THOROUGH)
///     .with_flip_vertically(true);
///
/// assert_eq!(config.footprint().to_string(), "6x6");
/// assert!(config.flip_vertically());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EncodeConfig {
    profile: Profile,
    footprint: BlockFootprint,
    quality: f32,
    flags: u32,
    flip_vertically: bool,
    thread_count: u32,
}

impl EncodeConfig {
    /// Create a config with the given footprint and defaults everywhere
    /// else: sRGB LDR profile, medium quality, no flags, no flip, one
    /// thread.
    pub fn new(footprint: BlockFootprint) -> Self {
        Self {
            profile: Profile::LdrSrgb,
            footprint,
            quality: quality::MEDIUM,
            flags: 0,
            flip_vertically: false,
            thread_count: 1,
        }
    }

    /// Set the color profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the search quality (0.0 fastest to 100.0 exhaustive).
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the engine flag bits.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Treat decoded images as bottom-up so normalization flips them.
    pub fn with_flip_vertically(mut self, flip: bool) -> Self {
        self.flip_vertically = flip;
        self
    }

    /// Set the encoder context thread count.
    pub fn with_thread_count(mut self, thread_count: u32) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn footprint(&self) -> BlockFootprint {
        self.footprint
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn flip_vertically(&self) -> bool {
        self.flip_vertically
    }

    pub fn thread_count(&self) -> u32 {
        self.thread_count
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self::new(BlockFootprint::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncodeConfig::default();
        assert_eq!(config.profile(), Profile::LdrSrgb);
        assert_eq!(config.footprint(), BlockFootprint::default());
        assert_eq!(config.quality(), quality::MEDIUM);
        assert_eq!(config.flags(), 0);
        assert!(!config.flip_vertically());
        assert_eq!(config.thread_count(), 1);
    }

    #[test]
    fn test_builder_methods() {
        let config = EncodeConfig::new(BlockFootprint::new(8, 8).unwrap())
            .with_profile(Profile::Hdr)
            .with_quality(quality::FAST)
            .with_flags(0x4)
            .with_flip_vertically(true)
            .with_thread_count(4);

        assert_eq!(config.profile(), Profile::Hdr);
        assert_eq!(config.quality(), quality::FAST);
        assert_eq!(config.flags(), 0x4);
        assert!(config.flip_vertically());
        assert_eq!(config.thread_count(), 4);
    }

    #[test]
    fn test_presets_are_ordered() {
        assert!(quality::FASTEST < quality::FAST);
        assert!(quality::FAST < quality::MEDIUM);
        assert!(quality::MEDIUM < quality::THOROUGH);
        assert!(quality::THOROUGH < quality::EXHAUSTIVE);
    }
}
