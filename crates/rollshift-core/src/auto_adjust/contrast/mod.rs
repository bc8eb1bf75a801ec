//! Adaptive local contrast
//!
//! CLAHE on the lightness plane only. The chroma planes are carried through
//! untouched, so this stage never changes color, only local brightness.

mod clahe;

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::color::LabPlanes;
use crate::models::ClaheParams;
use crate::raster::RgbImage;

pub use clahe::clahe_lightness;

/// Convert to Lab planes, equalize lightness, convert back.
pub fn enhance_contrast(image: &RgbImage, params: &ClaheParams) -> RgbImage {
    if image.is_empty() {
        return image.clone();
    }

    enhance_lightness(LabPlanes::from_rgb(image), params).to_rgb()
}

/// Replace the lightness plane with its equalized version. The chroma planes
/// are moved through as-is.
pub fn enhance_lightness(mut planes: LabPlanes, params: &ClaheParams) -> LabPlanes {
    planes.lightness = clahe_lightness(
        &planes.lightness,
        planes.width as usize,
        planes.height as usize,
        params,
    );
    trace!(
        clip_limit = params.clip_limit,
        tile_grid = params.tile_grid,
        "clahe applied"
    );
    planes
}
