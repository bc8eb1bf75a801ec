//! Gray World white balance

use tracing::trace;

use crate::auto_adjust::{channel_means, safe_gain};
use crate::raster::RgbImage;

/// Multipliers that bring every channel mean to the mean of the three.
///
/// A channel whose mean is (near) zero keeps a multiplier of 1.0: it is all
/// black and no gain could change it.
pub fn gray_world_multipliers(image: &RgbImage) -> [f32; 3] {
    let means = channel_means(image);
    let grand_mean = (means[0] + means[1] + means[2]) / 3.0;

    [
        safe_gain(grand_mean, means[0]),
        safe_gain(grand_mean, means[1]),
        safe_gain(grand_mean, means[2]),
    ]
}

/// Gray World Assumption: the average of the scene should be neutral gray.
pub fn gray_world_white_balance(image: &RgbImage) -> RgbImage {
    let gains = gray_world_multipliers(image);
    trace!(
        r = gains[0],
        g = gains[1],
        b = gains[2],
        "gray world multipliers"
    );

    image.map_pixels(|[r, g, b]| [r * gains[0], g * gains[1], b * gains[2]])
}
