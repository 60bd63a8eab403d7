//! Native astcenc backend.
//!
//! Binds the four capability operations to the `astcenc` shared library
//! (the `astcenc-sse2-shared` build). Only compiled with the
//! `native-encoder` feature so the rest of the crate builds and tests
//! without the engine installed.
//!
//! All pixel and destination buffers cross the boundary as borrowed
//! pointers with explicit lengths; the engine never owns memory allocated
//! on this side, and contexts allocated by the engine are returned to it
//! through [`BlockEncoder::context_free`] exactly once.

use std::ffi::{c_uint, c_void};
use std::ptr;

use crate::astc::BlockFootprint;

use super::{
    BlockEncoder, EncoderConfig, EncoderContext, EncoderError, EncoderImage, Profile, Swizzle,
};

mod sys {
    use std::ffi::{c_float, c_uint, c_void};

    /// Mirror of `astcenc_config`. Written by `astcenc_config_init` and
    /// treated as opaque afterwards; field order must match the engine's
    /// ABI exactly.
    #[repr(C)]
    #[derive(Clone, Copy)]
    #[allow(dead_code)]
    pub struct AstcencConfig {
        pub profile: c_uint,
        pub flags: c_uint,
        pub block_x: c_uint,
        pub block_y: c_uint,
        pub block_z: c_uint,
        pub cw_r_weight: c_float,
        pub cw_g_weight: c_float,
        pub cw_b_weight: c_float,
        pub cw_a_weight: c_float,
        pub a_scale_radius: c_uint,
        pub rgbm_m_scale: c_float,
        pub tune_partition_count_limit: c_uint,
        pub tune_2partition_index_limit: c_uint,
        pub tune_3partition_index_limit: c_uint,
        pub tune_4partition_index_limit: c_uint,
        pub tune_block_mode_limit: c_uint,
        pub tune_refinement_limit: c_uint,
        pub tune_candidate_limit: c_uint,
        pub tune_2partitioning_candidate_limit: c_uint,
        pub tune_3partitioning_candidate_limit: c_uint,
        pub tune_4partitioning_candidate_limit: c_uint,
        pub tune_db_limit: c_float,
        pub tune_mse_overshoot: c_float,
        pub tune_2partition_early_out_limit_factor: c_float,
        pub tune_3partition_early_out_limit_factor: c_float,
        pub tune_2plane_early_out_limit_correlation: c_float,
        pub tune_search_mode0_enable: c_float,
        pub progress_callback: *const c_void,
    }

    /// Mirror of `astcenc_image`. `data` is an array of per-slice pointers;
    /// 2D images use a single slice.
    #[repr(C)]
    pub struct AstcencImage {
        pub dim_x: c_uint,
        pub dim_y: c_uint,
        pub dim_z: c_uint,
        pub data_type: c_uint,
        pub data: *mut *mut c_void,
    }

    /// Mirror of `astcenc_swizzle`.
    #[repr(C)]
    pub struct AstcencSwizzle {
        pub r: c_uint,
        pub g: c_uint,
        pub b: c_uint,
        pub a: c_uint,
    }

    #[link(name = "astcenc-sse2-shared")]
    extern "C" {
        pub fn astcenc_config_init(
            profile: c_uint,
            block_x: c_uint,
            block_y: c_uint,
            block_z: c_uint,
            quality: c_float,
            flags: c_uint,
            config: *mut AstcencConfig,
        ) -> i32;

        pub fn astcenc_context_alloc(
            config: *const AstcencConfig,
            thread_count: c_uint,
            context: *mut *mut c_void,
        ) -> i32;

        pub fn astcenc_compress_image(
            context: *mut c_void,
            image: *mut AstcencImage,
            swizzle: *const AstcencSwizzle,
            data_out: *mut u8,
            data_len: usize,
            thread_index: c_uint,
        ) -> i32;

        pub fn astcenc_context_free(context: *mut c_void);
    }
}

/// Configuration handle contents: the engine-initialized config struct.
struct NativeConfig(sys::AstcencConfig);

// The config is plain data; the progress callback pointer is always null
// in configurations built here.
unsafe impl Send for NativeConfig {}

/// Context handle contents: the engine-allocated context pointer.
struct NativeContext(*mut c_void);

// astcenc contexts are designed to be driven from multiple threads.
unsafe impl Send for NativeContext {}

/// [`BlockEncoder`] backed by the astcenc shared library.
pub struct NativeEncoder;

impl NativeEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an engine status code onto the error enum. Zero is success.
fn check(code: i32) -> Result<(), EncoderError> {
    match code {
        0 => Ok(()),
        1 => Err(EncoderError::OutOfMem),
        2 => Err(EncoderError::BadCpuFloat),
        3 => Err(EncoderError::BadParam),
        4 => Err(EncoderError::BadBlockSize),
        5 => Err(EncoderError::BadProfile),
        6 => Err(EncoderError::BadQuality),
        7 => Err(EncoderError::BadSwizzle),
        8 => Err(EncoderError::BadFlags),
        9 => Err(EncoderError::BadContext),
        10 => Err(EncoderError::NotImplemented),
        11 => Err(EncoderError::BadDecodeMode),
        // Codes from a newer engine than this binding knows
        _ => Err(EncoderError::BadParam),
    }
}

impl BlockEncoder for NativeEncoder {
    fn config_init(
        &self,
        profile: Profile,
        footprint: &BlockFootprint,
        quality: f32,
        flags: u32,
    ) -> Result<EncoderConfig, EncoderError> {
        let mut config = std::mem::MaybeUninit::<sys::AstcencConfig>::zeroed();
        let code = unsafe {
            sys::astcenc_config_init(
                profile as c_uint,
                footprint.width(),
                footprint.height(),
                footprint.depth(),
                quality,
                flags,
                config.as_mut_ptr(),
            )
        };
        check(code)?;

        // config_init returned success, so the struct is fully written
        let config = unsafe { config.assume_init() };
        Ok(EncoderConfig::new(NativeConfig(config)))
    }

    fn context_alloc(
        &self,
        config: &EncoderConfig,
        thread_count: u32,
    ) -> Result<EncoderContext, EncoderError> {
        let Some(native_config) = config.downcast_ref::<NativeConfig>() else {
            return Err(EncoderError::BadParam);
        };

        let mut context: *mut c_void = ptr::null_mut();
        let code =
            unsafe { sys::astcenc_context_alloc(&native_config.0, thread_count, &mut context) };
        check(code)?;
        Ok(EncoderContext::new(NativeContext(context)))
    }

    fn compress(
        &self,
        context: &EncoderContext,
        image: &EncoderImage<'_>,
        swizzle: &Swizzle,
        destination: &mut [u8],
        thread_index: u32,
    ) -> Result<(), EncoderError> {
        let Some(native_context) = context.downcast_ref::<NativeContext>() else {
            return Err(EncoderError::BadContext);
        };

        // Single 2D slice; the pointer array must outlive the call.
        let mut slice = image.data.as_ptr() as *mut c_void;
        let mut raw_image = sys::AstcencImage {
            dim_x: image.dim_x,
            dim_y: image.dim_y,
            dim_z: image.dim_z,
            data_type: image.data_type as c_uint,
            data: &mut slice,
        };
        let raw_swizzle = sys::AstcencSwizzle {
            r: swizzle.r as c_uint,
            g: swizzle.g as c_uint,
            b: swizzle.b as c_uint,
            a: swizzle.a as c_uint,
        };

        let code = unsafe {
            sys::astcenc_compress_image(
                native_context.0,
                &mut raw_image,
                &raw_swizzle,
                destination.as_mut_ptr(),
                destination.len(),
                thread_index,
            )
        };
        check(code)
    }

    fn context_free(&self, context: EncoderContext) {
        if let Ok(native_context) = context.into_any().downcast::<NativeContext>() {
            unsafe { sys::astcenc_context_free(native_context.0) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_maps_known_codes() {
        assert!(check(0).is_ok());
        assert_eq!(check(1), Err(EncoderError::OutOfMem));
        assert_eq!(check(6), Err(EncoderError::BadQuality));
        assert_eq!(check(11), Err(EncoderError::BadDecodeMode));
        assert_eq!(check(99), Err(EncoderError::BadParam));
    }
}
