//! White-patch retinex normalization
//!
//! Assumes the brightest value of each channel should be full white and
//! stretches every channel so its maximum lands on 255.

use tracing::trace;

use crate::auto_adjust::channel_max;
use crate::raster::{RgbImage, SAMPLE_MAX};

/// Gains that take each channel maximum to 255 (1.0 for an all-black channel).
///
/// Any positive maximum is stretched, however small; only an all-zero
/// channel is left alone.
pub fn retinex_multipliers(image: &RgbImage) -> [f32; 3] {
    channel_max(image.data()).map(channel_gain)
}

fn channel_gain(max: f32) -> f32 {
    if max > 0.0 {
        (SAMPLE_MAX as f64 / max as f64) as f32
    } else {
        1.0
    }
}

/// Scale each channel by `255 / max`.
///
/// The sample holding a channel's maximum is written as exactly 255 rather
/// than `max * (255 / max)`, which can land an ulp short.
pub fn retinex_normalize(image: &RgbImage) -> RgbImage {
    let max = channel_max(image.data());
    let gains = retinex_multipliers(image);
    trace!(?max, ?gains, "retinex");

    image.map_pixels(|pixel| {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            out[c] = if max[c] > 0.0 && pixel[c] >= max[c] {
                SAMPLE_MAX
            } else {
                pixel[c] * gains[c]
            };
        }
        out
    })
}
