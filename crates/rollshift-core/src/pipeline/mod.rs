//! Image processing pipeline
//!
//! Core pipeline for negative-to-positive conversion.
//!
//! This module is organized into submodules:
//! - `base_estimation`: Film base measurement
//! - `inversion`: Negative-to-positive conversion
//! - `session`: Caller-owned review/adjust state machine
//! - `helpers`: Input validation and debug statistics
//!
//! The AUTO sequence is
//! base estimation -> inversion -> white balance -> retinex -> CLAHE ->
//! gamma -> denoise (optional) -> sharpen (optional).
//! The image after CLAHE is the *baseline*: the balanced, contrast-enhanced,
//! not yet gamma-corrected image. MANUAL re-enters from the baseline with a
//! user gamma and per-channel factors and skips denoise/sharpen.

mod base_estimation;
mod helpers;
mod inversion;
mod session;


use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::auto_adjust::{
    apply_channel_factors, apply_gamma, apply_white_balance, enhance_contrast, resolve_gamma,
    retinex_normalize,
};
use crate::error::{DomainError, Result};
use crate::filters::{denoise, sharpen};
use crate::models::{BaseColor, ManualAdjustments, PipelineConfig, PipelineMode};
use crate::raster::RgbImage;

pub use base_estimation::{base_sample_count, estimate_base, estimate_base_default};
pub use helpers::{compute_stats, validate_input};
pub use inversion::invert_negative;
pub use session::{Session, SessionState};

pub(crate) use helpers::log_stage;

/// Everything the AUTO path produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoOutput {
    /// Film base used for inversion
    pub base: BaseColor,

    /// Pre-gamma image the MANUAL path starts from
    pub baseline: RgbImage,

    /// Final AUTO positive
    pub positive: RgbImage,

    /// Gamma actually applied (resolved when adaptive)
    pub gamma_used: f32,
}

/// Run the AUTO path, estimating the film base from the scan itself.
pub fn process_auto(image: &RgbImage, config: &PipelineConfig) -> Result<AutoOutput> {
    let _span = debug_span!("process_auto", width = image.width(), height = image.height())
        .entered();

    config.validate()?;
    validate_input(image, config.max_pixels)?;

    let base = estimate_base(image, config.base_sample_percent)?;
    run_auto(image, base, config)
}

/// Run the AUTO path with a film base measured elsewhere, e.g. on another
/// frame of the same roll.
pub fn process_auto_with_base(
    image: &RgbImage,
    base: &BaseColor,
    config: &PipelineConfig,
) -> Result<AutoOutput> {
    let _span = debug_span!(
        "process_auto_with_base",
        width = image.width(),
        height = image.height()
    )
    .entered();

    config.validate()?;
    validate_input(image, config.max_pixels)?;

    run_auto(image, *base, config)
}

fn run_auto(image: &RgbImage, base: BaseColor, config: &PipelineConfig) -> Result<AutoOutput> {
    let positive = invert_negative(image, &base);
    log_stage("inversion", &positive);

    let balanced = apply_white_balance(&positive, config.white_balance);
    log_stage("white_balance", &balanced);

    let normalized = retinex_normalize(&balanced);
    log_stage("retinex", &normalized);

    let baseline = enhance_contrast(&normalized, &config.clahe);
    log_stage("clahe", &baseline);

    let gamma_used = resolve_gamma(&baseline, config.gamma);
    debug!(gamma = gamma_used, setting = %config.gamma, "resolved gamma");
    let mut output = apply_gamma(&baseline, gamma_used)?;
    log_stage("gamma", &output);

    if config.denoise_strength > 0.0 {
        output = denoise(&output, config.denoise_strength);
        log_stage("denoise", &output);
    }

    if config.sharpen_amount > 0.0 {
        output = sharpen(&output, config.sharpen_amount);
        log_stage("sharpen", &output);
    }

    Ok(AutoOutput {
        base,
        baseline,
        positive: output,
        gamma_used,
    })
}

/// Apply user gamma and per-channel factors to a baseline.
pub fn process_manual(baseline: &RgbImage, adjustments: &ManualAdjustments) -> Result<RgbImage> {
    adjustments.validate()?;
    if baseline.is_empty() {
        return Err(DomainError::EmptyImage.into());
    }

    let corrected = apply_gamma(baseline, adjustments.gamma)?;
    let output = apply_channel_factors(&corrected, &adjustments.factors);
    log_stage("manual", &output);
    Ok(output)
}

/// Full conversion for the configured mode.
///
/// `Auto` returns the AUTO positive; `Manual` continues from the baseline
/// with the config's `manual_gamma` and `channel_factors`.
pub fn process_image(image: &RgbImage, config: &PipelineConfig) -> Result<RgbImage> {
    let auto = process_auto(image, config)?;
    finish(auto, config)
}

/// [`process_image`] with a caller-supplied film base.
pub fn process_image_with_base(
    image: &RgbImage,
    base: &BaseColor,
    config: &PipelineConfig,
) -> Result<RgbImage> {
    let auto = process_auto_with_base(image, base, config)?;
    finish(auto, config)
}

fn finish(auto: AutoOutput, config: &PipelineConfig) -> Result<RgbImage> {
    match config.mode {
        PipelineMode::Auto => Ok(auto.positive),
        PipelineMode::Manual => process_manual(&auto.baseline, &config.manual_adjustments()),
    }
}

/// Convert independent images in parallel. Results are in input order and
/// identical to calling [`process_image`] on each image in turn.
pub fn process_batch(images: &[RgbImage], config: &PipelineConfig) -> Vec<Result<RgbImage>> {
    images
        .par_iter()
        .map(|image| process_image(image, config))
        .collect()
}
