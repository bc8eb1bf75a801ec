//! Film base estimation
//!
//! The film base (orange mask) is the brightest part of a scanned negative.
//! Averaging the brightest percentile instead of taking the single brightest
//! pixel keeps hot pixels and specular dust from skewing the estimate.


use std::cmp::Ordering;

use tracing::debug;

use crate::error::DomainError;
use crate::models::{BaseColor, DEFAULT_BASE_SAMPLE_PERCENT};
use crate::raster::RgbImage;

/// Number of pixels averaged for a given sample percentage (at least one).
pub fn base_sample_count(pixel_count: usize, sample_percent: f32) -> usize {
    let count = (pixel_count as f64 * sample_percent as f64 / 100.0).floor() as usize;
    count.clamp(1, pixel_count.max(1))
}

/// Estimate the film base from the brightest `sample_percent` of pixels.
///
/// Brightness is the sum of the three channels. Ties are broken by pixel
/// index, earlier pixels first, so the selected set never depends on sort
/// stability or thread scheduling. The result is the per-channel mean over
/// exactly that set.
///
/// # Errors
/// - [`DomainError::EmptyImage`] for an image with no pixels
/// - [`DomainError::DegenerateBase`] if any channel mean is zero
pub fn estimate_base(image: &RgbImage, sample_percent: f32) -> Result<BaseColor, DomainError> {
    let pixel_count = image.pixel_count();
    if pixel_count == 0 {
        return Err(DomainError::EmptyImage);
    }

    let data = image.data();
    let brightness: Vec<f32> = data
        .chunks_exact(3)
        .map(|pixel| pixel[0] + pixel[1] + pixel[2])
        .collect();

    let count = base_sample_count(pixel_count, sample_percent);
    let mut indices: Vec<usize> = (0..pixel_count).collect();

    // Brightest first, lower index first among equals
    let order = |&a: &usize, &b: &usize| -> Ordering {
        brightness[b]
            .total_cmp(&brightness[a])
            .then_with(|| a.cmp(&b))
    };

    if count < pixel_count {
        indices.select_nth_unstable_by(count - 1, order);
        indices.truncate(count);
    }
    // Sum in pixel order so the mean is reproducible
    indices.sort_unstable();

    let mut sums = [0.0f64; 3];
    for &idx in &indices {
        let pixel = &data[idx * 3..idx * 3 + 3];
        sums[0] += pixel[0] as f64;
        sums[1] += pixel[1] as f64;
        sums[2] += pixel[2] as f64;
    }
    let n = count as f64;
    let mean = [
        (sums[0] / n) as f32,
        (sums[1] / n) as f32,
        (sums[2] / n) as f32,
    ];

    debug!(
        sample_percent,
        samples = count,
        r = mean[0],
        g = mean[1],
        b = mean[2],
        "estimated film base"
    );

    BaseColor::new(mean)
}

/// [`estimate_base`] over the brightest 1%.
pub fn estimate_base_default(image: &RgbImage) -> Result<BaseColor, DomainError> {
    estimate_base(image, DEFAULT_BASE_SAMPLE_PERCENT)
}
