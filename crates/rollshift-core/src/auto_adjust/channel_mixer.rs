//! Per-channel multiplicative factors (manual adjustments)

use crate::models::ChannelFactors;
use crate::raster::RgbImage;

/// Multiply R, G and B by their factors, clipped to [0, 255].
pub fn apply_channel_factors(image: &RgbImage, factors: &ChannelFactors) -> RgbImage {
    if factors.is_identity() {
        return image.clone();
    }

    let [fr, fg, fb] = factors.as_array();
    image.map_pixels(|[r, g, b]| [r * fr, g * fg, b * fb])
}
