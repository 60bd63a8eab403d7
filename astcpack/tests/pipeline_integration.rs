//! End-to-end pipeline tests against the deterministic fake encoder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use astcpack::astc::{compressed_size, BlockFootprint, HEADER_BYTES};
use astcpack::config::EncodeConfig;
use astcpack::encoder::{EncoderError, FakeEncoder};
use astcpack::pipeline::TexturePipeline;

fn write_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgba([x as u8, y as u8, 0x7F, 0xFF]);
    }
    let path = dir.join("source.png");
    img.save(&path).unwrap();
    path
}

fn decode_u24(bytes: &[u8]) -> u32 {
    bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16
}

#[test]
fn test_four_by_four_image_produces_32_byte_container() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 4, 4);
    let output = dir.path().join("texture.astc");

    let pipeline = TexturePipeline::new(Arc::new(FakeEncoder::new()), EncodeConfig::default());
    let summary = pipeline.run(&input, &output).unwrap();

    assert_eq!((summary.width, summary.height), (4, 4));
    assert_eq!(summary.bytes_written, 32);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 32);

    // Header: magic, 4x4x1 footprint, 24-bit little-endian dimensions
    assert_eq!(&bytes[0..4], &[0x13, 0xAB, 0xA1, 0x5C]);
    assert_eq!(&bytes[4..7], &[4, 4, 1]);
    assert_eq!(decode_u24(&bytes[7..10]), 4);
    assert_eq!(decode_u24(&bytes[10..13]), 4);
    assert_eq!(decode_u24(&bytes[13..16]), 1);
}

#[test]
fn test_container_length_matches_estimate_for_odd_dimensions() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 10, 6);
    let output = dir.path().join("texture.astc");

    let footprint = BlockFootprint::new(4, 4).unwrap();
    let pipeline = TexturePipeline::new(
        Arc::new(FakeEncoder::new()),
        EncodeConfig::new(footprint),
    );
    let summary = pipeline.run(&input, &output).unwrap();

    // 10x6 with 4x4 blocks: 3 wide, 2 high
    let expected = HEADER_BYTES + compressed_size(10, 6, &footprint);
    assert_eq!(summary.bytes_written, expected);
    assert_eq!(fs::read(&output).unwrap().len(), expected);
}

#[test]
fn test_wide_footprint_container_records_block_size() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 24, 24);
    let output = dir.path().join("texture.astc");

    let footprint = BlockFootprint::new(12, 12).unwrap();
    let pipeline = TexturePipeline::new(
        Arc::new(FakeEncoder::new()),
        EncodeConfig::new(footprint),
    );
    pipeline.run(&input, &output).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[4..7], &[12, 12, 1]);
    assert_eq!(bytes.len(), HEADER_BYTES + 2 * 2 * 16);
}

#[test]
fn test_compress_failure_releases_context_and_writes_no_file() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 4, 4);
    let output = dir.path().join("texture.astc");

    let encoder = Arc::new(FakeEncoder::new().with_compress_error(EncoderError::NotImplemented));
    let pipeline = TexturePipeline::new(
        Arc::clone(&encoder) as Arc<dyn astcpack::encoder::BlockEncoder>,
        EncodeConfig::default(),
    );

    let result = pipeline.run(&input, &output);
    assert!(result.is_err());
    assert!(!output.exists());
    assert_eq!(encoder.contexts_allocated(), 1);
    assert_eq!(encoder.contexts_freed(), 1);
}

#[test]
fn test_successful_run_releases_context_exactly_once() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 16, 16);
    let output = dir.path().join("texture.astc");

    let encoder = Arc::new(FakeEncoder::new());
    let pipeline = TexturePipeline::new(
        Arc::clone(&encoder) as Arc<dyn astcpack::encoder::BlockEncoder>,
        EncodeConfig::default(),
    );
    pipeline.run(&input, &output).unwrap();

    assert_eq!(encoder.contexts_allocated(), 1);
    assert_eq!(encoder.contexts_freed(), 1);
}

#[test]
fn test_missing_input_writes_no_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("texture.astc");

    let pipeline = TexturePipeline::new(Arc::new(FakeEncoder::new()), EncodeConfig::default());
    let result = pipeline.run(&dir.path().join("missing.png"), &output);

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_flip_flag_runs_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), 8, 8);
    let output = dir.path().join("texture.astc");

    let pipeline = TexturePipeline::new(
        Arc::new(FakeEncoder::new()),
        EncodeConfig::default().with_flip_vertically(true),
    );
    let summary = pipeline.run(&input, &output).unwrap();
    assert_eq!(summary.bytes_written, HEADER_BYTES + 4 * 16);
}
