//! Negative-to-positive inversion
//!
//! Dividing each channel by its film base value removes the orange mask and
//! normalizes the channel in one step; subtracting from 255 then flips the
//! tones.


use crate::models::BaseColor;
use crate::raster::{RgbImage, SAMPLE_MAX};

/// Per channel: `scaled = clamp(v * 255 / base, 0, 255)`, `out = 255 - scaled`.
///
/// [`BaseColor`] guarantees strictly positive channels, so there is no
/// division by zero to guard against here.
pub fn invert_negative(image: &RgbImage, base: &BaseColor) -> RgbImage {
    let rgb = base.rgb();
    let scale = [
        SAMPLE_MAX / rgb[0],
        SAMPLE_MAX / rgb[1],
        SAMPLE_MAX / rgb[2],
    ];

    image.map_pixels(|pixel| {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            // Samples at or above the base are film base: they map to black
            let scaled = if pixel[c] >= rgb[c] {
                SAMPLE_MAX
            } else {
                (pixel[c] * scale[c]).min(SAMPLE_MAX)
            };
            out[c] = SAMPLE_MAX - scaled;
        }
        out
    })
}
