//! Bilateral denoise

use crate::auto_adjust::parallel_for_each_row_mut;
use crate::raster::{clamp_sample, RgbImage};

/// Half-width of the filter window.
pub const DENOISE_RADIUS: usize = 2;

/// Spatial Gaussian sigma, in pixels.
pub const DENOISE_SPATIAL_SIGMA: f32 = 1.5;

/// Range sigma per unit of strength, in 8-bit units.
const RANGE_SIGMA_PER_STRENGTH: f32 = 3.0;

const WINDOW: usize = 2 * DENOISE_RADIUS + 1;

/// Edge-preserving smoothing.
///
/// Each output pixel is the weighted mean of its 5x5 neighbourhood. Weights
/// combine a spatial Gaussian with a range Gaussian on the RGB distance to
/// the center, `sigma_r = 3 * strength`, so large color steps are left
/// alone. The window is truncated at the image border. `strength <= 0`
/// returns the input unchanged.
pub fn denoise(image: &RgbImage, strength: f32) -> RgbImage {
    if strength.is_nan() || strength <= 0.0 || image.is_empty() {
        return image.clone();
    }

    let spatial = spatial_weights();
    let range_sigma = RANGE_SIGMA_PER_STRENGTH * strength;
    let range_denom = 2.0 * range_sigma * range_sigma;

    let width = image.width() as usize;
    let height = image.height() as usize;
    let src = image.data();
    let mut out = vec![0.0f32; src.len()];

    parallel_for_each_row_mut(&mut out, width * 3, |y, row| {
        let y0 = y.saturating_sub(DENOISE_RADIUS);
        let y1 = (y + DENOISE_RADIUS + 1).min(height);

        for x in 0..width {
            let center_idx = (y * width + x) * 3;
            let center = [src[center_idx], src[center_idx + 1], src[center_idx + 2]];

            let x0 = x.saturating_sub(DENOISE_RADIUS);
            let x1 = (x + DENOISE_RADIUS + 1).min(width);

            let mut sum = [0.0f32; 3];
            let mut weight_sum = 0.0f32;

            for ny in y0..y1 {
                let wy = ny + DENOISE_RADIUS - y;
                for nx in x0..x1 {
                    let wx = nx + DENOISE_RADIUS - x;
                    let idx = (ny * width + nx) * 3;
                    let neighbor = [src[idx], src[idx + 1], src[idx + 2]];

                    let dr = neighbor[0] - center[0];
                    let dg = neighbor[1] - center[1];
                    let db = neighbor[2] - center[2];
                    let dist_sq = dr * dr + dg * dg + db * db;

                    let weight = spatial[wy][wx] * (-dist_sq / range_denom).exp();
                    sum[0] += neighbor[0] * weight;
                    sum[1] += neighbor[1] * weight;
                    sum[2] += neighbor[2] * weight;
                    weight_sum += weight;
                }
            }

            let out_px = &mut row[x * 3..x * 3 + 3];
            if weight_sum > 0.0 {
                for c in 0..3 {
                    out_px[c] = clamp_sample(sum[c] / weight_sum);
                }
            } else {
                out_px.copy_from_slice(&center);
            }
        }
    });

    RgbImage::from_raw(image.width(), image.height(), out)
}

fn spatial_weights() -> [[f32; WINDOW]; WINDOW] {
    let denom = 2.0 * DENOISE_SPATIAL_SIGMA * DENOISE_SPATIAL_SIGMA;
    let mut weights = [[0.0f32; WINDOW]; WINDOW];
    for (wy, row) in weights.iter_mut().enumerate() {
        for (wx, weight) in row.iter_mut().enumerate() {
            let dy = wy as f32 - DENOISE_RADIUS as f32;
            let dx = wx as f32 - DENOISE_RADIUS as f32;
            *weight = (-(dx * dx + dy * dy) / denom).exp();
        }
    }
    weights
}
