//! Parameter bundle for the processing pipeline.

mod defaults;
mod enums;


use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use defaults::{
    CHANNEL_FACTOR_RANGE, CLAHE_CLIP_LIMIT_RANGE, CLAHE_TILE_GRID_RANGE, DEFAULT_BASE_SAMPLE_PERCENT,
    DEFAULT_CHANNEL_FACTOR, DEFAULT_CLAHE_CLIP_LIMIT, DEFAULT_CLAHE_TILE_GRID,
    DEFAULT_DENOISE_STRENGTH, DEFAULT_GAMMA, DEFAULT_MANUAL_GAMMA, DEFAULT_MAX_PIXELS,
    DEFAULT_SHARPEN_AMOUNT, DENOISE_STRENGTH_RANGE, GAMMA_RANGE, SHARPEN_AMOUNT_RANGE,
};
pub use enums::{GammaSetting, PipelineMode, WhiteBalanceMethod};

/// Immutable configuration for one pipeline invocation.
///
/// Every field has a default, so partial YAML files deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// AUTO or MANUAL sequence
    pub mode: PipelineMode,

    /// White balance strategy for the AUTO path
    pub white_balance: WhiteBalanceMethod,

    /// Gamma for the AUTO path (fixed value or adaptive)
    pub gamma: GammaSetting,

    /// Gamma applied by the MANUAL path
    pub manual_gamma: f32,

    /// Per-channel multipliers applied by the MANUAL path
    pub channel_factors: ChannelFactors,

    /// Local contrast parameters
    pub clahe: ClaheParams,

    /// Bilateral denoise strength (0 disables)
    pub denoise_strength: f32,

    /// Sharpen blend amount (0 disables)
    pub sharpen_amount: f32,

    /// Percentage of brightest pixels averaged into the film base
    pub base_sample_percent: f32,

    /// Largest accepted input, in pixels
    pub max_pixels: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            white_balance: WhiteBalanceMethod::default(),
            gamma: GammaSetting::default(),
            manual_gamma: DEFAULT_MANUAL_GAMMA,
            channel_factors: ChannelFactors::default(),
            clahe: ClaheParams::default(),
            denoise_strength: DEFAULT_DENOISE_STRENGTH,
            sharpen_amount: DEFAULT_SHARPEN_AMOUNT,
            base_sample_percent: DEFAULT_BASE_SAMPLE_PERCENT,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl PipelineConfig {
    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let GammaSetting::Fixed(gamma) = self.gamma {
            check_range("gamma", gamma, GAMMA_RANGE, "[0.4, 2.5]")?;
        }
        self.manual_adjustments().validate()?;
        self.clahe.validate()?;
        check_range(
            "denoise_strength",
            self.denoise_strength,
            DENOISE_STRENGTH_RANGE,
            "[0, 50]",
        )?;
        check_range(
            "sharpen_amount",
            self.sharpen_amount,
            SHARPEN_AMOUNT_RANGE,
            "[0, 2]",
        )?;
        if !(self.base_sample_percent > 0.0 && self.base_sample_percent <= 100.0) {
            return Err(ConfigError::OutOfRange {
                field: "base_sample_percent",
                value: self.base_sample_percent as f64,
                range: "(0, 100]",
            });
        }
        if self.max_pixels == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_pixels",
                value: 0.0,
                range: "> 0",
            });
        }
        Ok(())
    }

    /// The slice of this config the MANUAL path consumes.
    pub fn manual_adjustments(&self) -> ManualAdjustments {
        ManualAdjustments {
            gamma: self.manual_gamma,
            factors: self.channel_factors,
        }
    }
}

/// Per-channel multiplicative factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelFactors {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for ChannelFactors {
    fn default() -> Self {
        Self {
            red: DEFAULT_CHANNEL_FACTOR,
            green: DEFAULT_CHANNEL_FACTOR,
            blue: DEFAULT_CHANNEL_FACTOR,
        }
    }
}

impl ChannelFactors {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn is_identity(&self) -> bool {
        self.as_array().iter().all(|&f| (f - 1.0).abs() < f32::EPSILON)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("channel_factors.red", self.red, CHANNEL_FACTOR_RANGE, "[0.5, 2.0]")?;
        check_range(
            "channel_factors.green",
            self.green,
            CHANNEL_FACTOR_RANGE,
            "[0.5, 2.0]",
        )?;
        check_range("channel_factors.blue", self.blue, CHANNEL_FACTOR_RANGE, "[0.5, 2.0]")
    }
}

/// Contrast-limited adaptive histogram equalization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaheParams {
    /// Multiple of the uniform bin height at which histogram bins are clipped
    pub clip_limit: f32,

    /// Number of tiles along each axis
    pub tile_grid: u32,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
            tile_grid: DEFAULT_CLAHE_TILE_GRID,
        }
    }
}

impl ClaheParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "clahe.clip_limit",
            self.clip_limit,
            CLAHE_CLIP_LIMIT_RANGE,
            "[0.01, 40]",
        )?;
        if !CLAHE_TILE_GRID_RANGE.contains(&self.tile_grid) {
            return Err(ConfigError::OutOfRange {
                field: "clahe.tile_grid",
                value: self.tile_grid as f64,
                range: "[1, 64]",
            });
        }
        Ok(())
    }
}

/// User-chosen overrides applied on top of the pre-gamma baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualAdjustments {
    pub gamma: f32,
    pub factors: ChannelFactors,
}

impl Default for ManualAdjustments {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_MANUAL_GAMMA,
            factors: ChannelFactors::default(),
        }
    }
}

impl ManualAdjustments {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("manual_gamma", self.gamma, GAMMA_RANGE, "[0.4, 2.5]")?;
        self.factors.validate()
    }
}

fn check_range(
    field: &'static str,
    value: f32,
    valid: RangeInclusive<f32>,
    range: &'static str,
) -> Result<(), ConfigError> {
    // NaN fails `contains`, so it is reported as out of range too
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            range,
        })
    }
}
