//! Helper functions for the processing pipeline
//!
//! Input validation and per-stage statistics for debug output.

use tracing::{debug, enabled, Level};

use crate::error::DomainError;
use crate::raster::RgbImage;

/// Compute min, max, and mean statistics for debug output
pub fn compute_stats(data: &[f32]) -> (f32, f32, f32) {
    if data.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum = 0.0f64;

    for &value in data {
        min = min.min(value);
        max = max.max(value);
        sum += value as f64;
    }

    let mean = (sum / data.len() as f64) as f32;
    (min, max, mean)
}

/// Reject inputs the pipeline cannot or should not process.
pub fn validate_input(image: &RgbImage, max_pixels: u64) -> Result<(), DomainError> {
    if image.is_empty() {
        return Err(DomainError::EmptyImage);
    }
    let pixels = image.pixel_count() as u64;
    if pixels > max_pixels {
        return Err(DomainError::ImageTooLarge {
            pixels,
            max: max_pixels,
        });
    }
    Ok(())
}

/// Log min/max/mean after a stage. Statistics are only computed when debug
/// logging is on.
pub(crate) fn log_stage(stage: &'static str, image: &RgbImage) {
    if enabled!(Level::DEBUG) {
        let (min, max, mean) = compute_stats(image.data());
        debug!(stage, min, max, mean, "stage complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_stats() {
        let (min, max, mean) = compute_stats(&[1.0, 5.0, 3.0]);
        assert_eq!(min, 1.0);
        assert_eq!(max, 5.0);
        assert_eq!(mean, 3.0);
        assert_eq!(compute_stats(&[]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_validate_input_limits() {
        let image = RgbImage::filled(10, 10, [1.0, 1.0, 1.0]).unwrap();
        assert!(validate_input(&image, 100).is_ok());
        assert_eq!(
            validate_input(&image, 99).unwrap_err(),
            DomainError::ImageTooLarge {
                pixels: 100,
                max: 99
            }
        );

        let empty = RgbImage::new(0, 5, Vec::new()).unwrap();
        assert_eq!(
            validate_input(&empty, 100).unwrap_err(),
            DomainError::EmptyImage
        );
    }
}
