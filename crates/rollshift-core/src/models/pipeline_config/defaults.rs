//! Default values and valid ranges for pipeline parameters.

use std::ops::RangeInclusive;

/// Gamma used by the AUTO path when no adaptive gamma is requested.
pub const DEFAULT_GAMMA: f32 = 0.5;

/// Gamma the MANUAL path starts from before the user moves the slider.
pub const DEFAULT_MANUAL_GAMMA: f32 = 0.5;

/// Valid range for any explicit gamma value.
pub const GAMMA_RANGE: RangeInclusive<f32> = 0.4..=2.5;

/// Per-channel multiplier defaults and range.
pub const DEFAULT_CHANNEL_FACTOR: f32 = 1.0;
pub const CHANNEL_FACTOR_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// CLAHE clip limit (multiple of the uniform bin height).
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 2.0;
pub const CLAHE_CLIP_LIMIT_RANGE: RangeInclusive<f32> = 0.01..=40.0;

/// CLAHE tiles per axis.
pub const DEFAULT_CLAHE_TILE_GRID: u32 = 8;
pub const CLAHE_TILE_GRID_RANGE: RangeInclusive<u32> = 1..=64;

/// Bilateral denoise strength (0 disables).
pub const DEFAULT_DENOISE_STRENGTH: f32 = 0.0;
pub const DENOISE_STRENGTH_RANGE: RangeInclusive<f32> = 0.0..=50.0;

/// Sharpen blend amount (0 disables, 1 applies the kernel as-is).
pub const DEFAULT_SHARPEN_AMOUNT: f32 = 0.0;
pub const SHARPEN_AMOUNT_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Fraction of brightest pixels averaged into the film base (percent).
pub const DEFAULT_BASE_SAMPLE_PERCENT: f32 = 1.0;

/// Upper bound on input size (100 megapixels).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;
