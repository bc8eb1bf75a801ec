//! Automatic adjustment stages
//!
//! Every stage takes an [`RgbImage`](crate::raster::RgbImage) plus the slice
//! of configuration it needs and returns a new image. Stages never call each
//! other; [`crate::pipeline`] sequences them.

mod channel_mixer;
mod contrast;
mod gamma;
mod parallel;
mod retinex;
mod white_balance;

/// Minimum number of pixels to trigger parallel processing
pub(crate) const PARALLEL_THRESHOLD: usize = 30_000;

/// Channel statistics at or below this value are treated as zero when
/// deriving a gain.
pub(crate) const GAIN_EPSILON: f64 = 1e-6;

pub use channel_mixer::apply_channel_factors;
pub use contrast::{clahe_lightness, enhance_contrast, enhance_lightness};
pub use gamma::{adaptive_gamma, apply_gamma, mean_luma, resolve_gamma};
pub use retinex::{retinex_multipliers, retinex_normalize};
pub use white_balance::{
    apply_white_balance, gray_world_multipliers, gray_world_white_balance, lab_white_balance,
};

pub(crate) use parallel::{
    channel_max, channel_sums, parallel_for_each_pixel_mut, parallel_for_each_row_mut,
    parallel_map_rows,
};

/// `target / value`, or 1.0 when `value` is too small to divide by.
#[inline]
pub(crate) fn safe_gain(target: f64, value: f64) -> f32 {
    if value > GAIN_EPSILON {
        (target / value) as f32
    } else {
        1.0
    }
}

/// Per-channel means of an image, accumulated in row order.
pub(crate) fn channel_means(image: &crate::raster::RgbImage) -> [f64; 3] {
    let pixels = image.pixel_count();
    if pixels == 0 {
        return [0.0; 3];
    }
    let sums = channel_sums(image.data(), image.width() as usize);
    let n = pixels as f64;
    [sums[0] / n, sums[1] / n, sums[2] / n]
}
