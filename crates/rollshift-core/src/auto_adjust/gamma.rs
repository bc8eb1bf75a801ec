//! Gamma correction
//!
//! `out = 255 * (in / 255)^(1 / gamma)`. Gamma above 1 brightens, below 1
//! darkens.

use crate::auto_adjust::channel_means;
use crate::error::DomainError;
use crate::models::GammaSetting;
use crate::raster::{RgbImage, SAMPLE_MAX};

/// Bounds for the content-derived gamma.
const ADAPTIVE_GAMMA_MIN: f32 = 0.4;
const ADAPTIVE_GAMMA_MAX: f32 = 2.5;

/// Rec. 601 luma weights
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Apply a power curve to every sample.
///
/// Fails with [`DomainError::InvalidGamma`] for a non-positive or non-finite
/// gamma.
pub fn apply_gamma(image: &RgbImage, gamma: f32) -> Result<RgbImage, DomainError> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(DomainError::InvalidGamma(gamma));
    }

    let exponent = 1.0 / gamma;
    Ok(image.map_pixels(|pixel| pixel.map(|v| SAMPLE_MAX * (v / SAMPLE_MAX).powf(exponent))))
}

/// Mean Rec. 601 luma of the image, 0-255.
pub fn mean_luma(image: &RgbImage) -> f32 {
    let means = channel_means(image);
    (LUMA_WEIGHTS[0] * means[0] + LUMA_WEIGHTS[1] * means[1] + LUMA_WEIGHTS[2] * means[2]) as f32
}

/// Gamma derived from brightness: darker images get a higher gamma.
///
/// `clamp(1.5 - mean_luma / 128, 0.4, 2.5)`
pub fn adaptive_gamma(image: &RgbImage) -> f32 {
    (1.5 - mean_luma(image) / 128.0).clamp(ADAPTIVE_GAMMA_MIN, ADAPTIVE_GAMMA_MAX)
}

/// The gamma a [`GammaSetting`] resolves to for this image.
pub fn resolve_gamma(image: &RgbImage, setting: GammaSetting) -> f32 {
    match setting {
        GammaSetting::Fixed(gamma) => gamma,
        GammaSetting::Adaptive => adaptive_gamma(image),
    }
}
