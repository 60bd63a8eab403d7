//! astcpack CLI - compress images into ASTC texture containers.

mod error;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use astcpack::astc::BlockFootprint;
use astcpack::config::{quality, EncodeConfig};
use astcpack::encoder::{BlockEncoder, Profile};
use astcpack::TexturePipeline;

use crate::error::CliError;

/// Block footprint selection for CLI arguments.
///
/// Every legal 2D ASTC block size, from 8.0 bits per pixel (4x4) down to
/// 0.89 bits per pixel (12x12).
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BlockSize {
    #[value(name = "4x4")]
    B4x4,
    #[value(name = "5x4")]
    B5x4,
    #[value(name = "5x5")]
    B5x5,
    #[value(name = "6x5")]
    B6x5,
    #[value(name = "6x6")]
    B6x6,
    #[value(name = "8x5")]
    B8x5,
    #[value(name = "8x6")]
    B8x6,
    #[value(name = "8x8")]
    B8x8,
    #[value(name = "10x5")]
    B10x5,
    #[value(name = "10x6")]
    B10x6,
    #[value(name = "10x8")]
    B10x8,
    #[value(name = "10x10")]
    B10x10,
    #[value(name = "12x10")]
    B12x10,
    #[value(name = "12x12")]
    B12x12,
}

impl BlockSize {
    fn dimensions(self) -> (u32, u32) {
        match self {
            BlockSize::B4x4 => (4, 4),
            BlockSize::B5x4 => (5, 4),
            BlockSize::B5x5 => (5, 5),
            BlockSize::B6x5 => (6, 5),
            BlockSize::B6x6 => (6, 6),
            BlockSize::B8x5 => (8, 5),
            BlockSize::B8x6 => (8, 6),
            BlockSize::B8x8 => (8, 8),
            BlockSize::B10x5 => (10, 5),
            BlockSize::B10x6 => (10, 6),
            BlockSize::B10x8 => (10, 8),
            BlockSize::B10x10 => (10, 10),
            BlockSize::B12x10 => (12, 10),
            BlockSize::B12x12 => (12, 12),
        }
    }

    fn to_footprint(self) -> Result<BlockFootprint, CliError> {
        let (width, height) = self.dimensions();
        BlockFootprint::new(width, height).map_err(|e| CliError::Config(e.to_string()))
    }
}

/// Color profile selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Low dynamic range, sRGB color space
    LdrSrgb,
    /// Low dynamic range, linear color space
    Ldr,
    /// HDR color with LDR alpha
    HdrRgbLdrA,
    /// Full high dynamic range
    Hdr,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::LdrSrgb => Profile::LdrSrgb,
            ProfileArg::Ldr => Profile::Ldr,
            ProfileArg::HdrRgbLdrA => Profile::HdrRgbLdrA,
            ProfileArg::Hdr => Profile::Hdr,
        }
    }
}

/// Compress an image into an ASTC texture container.
#[derive(Debug, Parser)]
#[command(name = "astcpack", version, about)]
struct Cli {
    /// Source image (any format the decoder recognizes)
    input: PathBuf,

    /// Output file; defaults to the input path with an .astc extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Block footprint in pixels
    #[arg(long, value_enum, default_value = "4x4")]
    block_size: BlockSize,

    /// Search quality: a preset (fastest, fast, medium, thorough,
    /// exhaustive) or a number from 0 to 100
    #[arg(long, default_value = "medium")]
    quality: String,

    /// Color profile
    #[arg(long, value_enum, default_value = "ldr-srgb")]
    profile: ProfileArg,

    /// Flip the image vertically (for engines sampling with an inverted V axis)
    #[arg(long)]
    flip: bool,

    /// Encoder context thread count
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    threads: u32,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

/// Parse a quality preset name or a numeric value in 0..=100.
fn resolve_quality(value: &str) -> Result<f32, CliError> {
    let parsed = match value.to_lowercase().as_str() {
        "fastest" => quality::FASTEST,
        "fast" => quality::FAST,
        "medium" => quality::MEDIUM,
        "thorough" => quality::THOROUGH,
        "exhaustive" => quality::EXHAUSTIVE,
        other => other.parse::<f32>().map_err(|_| {
            CliError::Config(format!(
                "Invalid quality '{}': expected a preset name or a number from 0 to 100",
                value
            ))
        })?,
    };

    if !(0.0..=100.0).contains(&parsed) {
        return Err(CliError::Config(format!(
            "Quality {} is outside the supported range 0 to 100",
            parsed
        )));
    }
    Ok(parsed)
}

#[cfg(feature = "native-encoder")]
fn build_encoder() -> Result<Arc<dyn BlockEncoder>, CliError> {
    Ok(Arc::new(astcpack::encoder::NativeEncoder::new()))
}

#[cfg(not(feature = "native-encoder"))]
fn build_encoder() -> Result<Arc<dyn BlockEncoder>, CliError> {
    Err(CliError::Config(
        "this build does not include an encoding engine; \
         rebuild with `--features native-encoder`"
            .to_string(),
    ))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let footprint = cli.block_size.to_footprint()?;
    let quality = resolve_quality(&cli.quality)?;
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("astc"));

    let config = EncodeConfig::new(footprint)
        .with_profile(cli.profile.into())
        .with_quality(quality)
        .with_flip_vertically(cli.flip)
        .with_thread_count(cli.threads);
    debug!(%footprint, quality, profile = ?cli.profile, flip = cli.flip, "Resolved encode settings");

    let encoder = build_encoder()?;
    let pipeline = TexturePipeline::new(encoder, config);
    let summary = pipeline.run(&cli.input, &output)?;

    println!(
        "Compressed {}x{} image to {} ({} bytes, {} blocks)",
        summary.width,
        summary.height,
        output.display(),
        summary.bytes_written,
        footprint,
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
