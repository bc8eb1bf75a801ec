//! Lightness/chroma white balance

use tracing::trace;

use crate::auto_adjust::parallel_map_rows;
use crate::color::{LabPlanes, CHROMA_NEUTRAL};
use crate::raster::RgbImage;

/// Shift both chroma planes so their means are neutral (128), leaving the
/// lightness plane untouched.
pub fn lab_white_balance(image: &RgbImage) -> RgbImage {
    if image.is_empty() {
        return image.clone();
    }

    let mut planes = LabPlanes::from_rgb(image);
    let width = planes.width as usize;

    let shift_a = plane_mean(&planes.chroma_a, width) - CHROMA_NEUTRAL;
    let shift_b = plane_mean(&planes.chroma_b, width) - CHROMA_NEUTRAL;
    trace!(shift_a, shift_b, "lab chroma shift");

    for value in planes.chroma_a.iter_mut() {
        *value -= shift_a;
    }
    for value in planes.chroma_b.iter_mut() {
        *value -= shift_b;
    }

    planes.to_rgb()
}

/// Mean of a single plane, summed per row then in row order.
fn plane_mean(plane: &[f32], width: usize) -> f32 {
    if plane.is_empty() {
        return 0.0;
    }
    let rows = parallel_map_rows(plane, width, |row| {
        row.iter().map(|&v| v as f64).sum::<f64>()
    });
    let total: f64 = rows.into_iter().sum();
    (total / plane.len() as f64) as f32
}
