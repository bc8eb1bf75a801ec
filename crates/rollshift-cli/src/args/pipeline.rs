//! Pipeline argument structs for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use rollshift_core::decoders::ImageFormat;
use rollshift_core::exporters::DEFAULT_JPEG_QUALITY;
use rollshift_core::{BaseColor, GammaSetting, WhiteBalanceMethod};

use crate::parsers::{parse_base_rgb, parse_gamma, parse_output_format, parse_white_balance};
use crate::processing::{load_config, PipelineOverrides, ProcessingParams};

/// Common pipeline arguments shared between Convert and Batch commands.
#[derive(Args, Clone, Debug)]
pub struct PipelineArgs {
    /// Pipeline config file (YAML). Without it the usual locations are searched
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AUTO gamma: a value in 0.4-2.5, or "adaptive"
    #[arg(long, value_name = "GAMMA", value_parser = parse_gamma)]
    pub gamma: Option<GammaSetting>,

    /// White balance method: "gray-world" or "lab"
    #[arg(long, value_name = "METHOD", value_parser = parse_white_balance)]
    pub wb: Option<WhiteBalanceMethod>,

    /// Use MANUAL mode: re-grade the pre-gamma baseline with the values below
    #[arg(long)]
    pub manual: bool,

    /// MANUAL red channel factor (0.5-2.0)
    #[arg(long, value_name = "FACTOR")]
    pub red: Option<f32>,

    /// MANUAL green channel factor (0.5-2.0)
    #[arg(long, value_name = "FACTOR")]
    pub green: Option<f32>,

    /// MANUAL blue channel factor (0.5-2.0)
    #[arg(long, value_name = "FACTOR")]
    pub blue: Option<f32>,

    /// MANUAL gamma (0.4-2.5)
    #[arg(long, value_name = "GAMMA")]
    pub manual_gamma: Option<f32>,

    /// Bilateral denoise strength (0 disables, max 50)
    #[arg(long, value_name = "STRENGTH")]
    pub denoise: Option<f32>,

    /// Sharpen amount (0 disables, max 2)
    #[arg(long, value_name = "AMOUNT")]
    pub sharpen: Option<f32>,

    /// Manual film base (R,G,B), 0-255 or normalized 0-1.
    /// Overrides automatic base estimation
    #[arg(long, value_name = "R,G,B", value_parser = parse_base_rgb)]
    pub base: Option<BaseColor>,

    /// Film base JSON saved by `analyze-base --save`
    #[arg(long, value_name = "FILE", conflicts_with = "base")]
    pub base_from: Option<PathBuf>,

    /// Output format: jpg, png or tif. Defaults to the output extension, then jpg
    #[arg(long, value_name = "FORMAT", value_parser = parse_output_format)]
    pub format: Option<ImageFormat>,

    /// JPEG quality (1-100)
    #[arg(
        long,
        value_name = "Q",
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,
}

impl PipelineArgs {
    /// Load the config, apply the flags on top and validate.
    pub fn processing_params(&self) -> anyhow::Result<ProcessingParams> {
        let config = load_config(self.config.as_deref())?;
        let config = self.overrides().apply(config)?;
        let base = match &self.base_from {
            Some(path) => Some(read_base_file(path)?),
            None => self.base,
        };
        Ok(ProcessingParams {
            config,
            base,
            format: self.format,
            jpeg_quality: self.quality,
        })
    }

    pub fn overrides(&self) -> PipelineOverrides {
        PipelineOverrides {
            gamma: self.gamma,
            white_balance: self.wb,
            manual: self.manual,
            red: self.red,
            green: self.green,
            blue: self.blue,
            manual_gamma: self.manual_gamma,
            denoise: self.denoise,
            sharpen: self.sharpen,
        }
    }
}

fn read_base_file(path: &Path) -> anyhow::Result<BaseColor> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read base file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse base file {}", path.display()))
}
