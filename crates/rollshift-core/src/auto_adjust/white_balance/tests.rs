//! Tests for white balance functions

use super::*;
use crate::color::{LabPlanes, CHROMA_NEUTRAL};
use crate::raster::RgbImage;

fn tinted_image() -> RgbImage {
    // Warm cast, no sample close to 255 so nothing clips
    let mut data = Vec::new();
    for i in 0..48 {
        let v = 40.0 + (i % 16) as f32 * 5.0;
        data.extend_from_slice(&[v * 1.3, v, v * 0.7]);
    }
    RgbImage::new(8, 6, data).unwrap()
}

fn means(image: &RgbImage) -> [f32; 3] {
    let mut sums = [0.0f64; 3];
    for pixel in image.data().chunks_exact(3) {
        for c in 0..3 {
            sums[c] += pixel[c] as f64;
        }
    }
    let n = image.pixel_count() as f64;
    [
        (sums[0] / n) as f32,
        (sums[1] / n) as f32,
        (sums[2] / n) as f32,
    ]
}

// ============================================================================
// Gray World
// ============================================================================

#[test]
fn test_gray_world_neutral_image() {
    let image = RgbImage::filled(4, 4, [90.0, 90.0, 90.0]).unwrap();
    let multipliers = gray_world_multipliers(&image);

    for m in multipliers {
        assert!((m - 1.0).abs() < 1e-6, "Neutral image should have multiplier ~1.0");
    }
    assert_eq!(gray_world_white_balance(&image), image);
}

#[test]
fn test_gray_world_equalizes_means() {
    let balanced = gray_world_white_balance(&tinted_image());
    let m = means(&balanced);

    assert!((m[0] - m[1]).abs() < 0.01, "means {:?}", m);
    assert!((m[1] - m[2]).abs() < 0.01, "means {:?}", m);
}

#[test]
fn test_gray_world_is_idempotent() {
    let once = gray_world_white_balance(&tinted_image());
    let twice = gray_world_white_balance(&once);

    for (a, b) in once.data().iter().zip(twice.data()) {
        assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn test_gray_world_zero_channel_is_neutral() {
    // Blue channel is entirely black
    let image = RgbImage::new(2, 1, vec![100.0, 50.0, 0.0, 60.0, 30.0, 0.0]).unwrap();
    let multipliers = gray_world_multipliers(&image);

    assert_eq!(multipliers[2], 1.0);
    let balanced = gray_world_white_balance(&image);
    assert!(balanced.data().iter().all(|v| v.is_finite()));
    assert_eq!(balanced.pixel(0, 0)[2], 0.0);
}

#[test]
fn test_gray_world_all_black() {
    let image = RgbImage::filled(3, 3, [0.0, 0.0, 0.0]).unwrap();
    assert_eq!(gray_world_multipliers(&image), [1.0, 1.0, 1.0]);
    assert_eq!(gray_world_white_balance(&image), image);
}

#[test]
fn test_gray_world_clips_to_range() {
    // A bright red sample in a dim-red scene gets pushed past 255
    let image = RgbImage::new(2, 1, vec![10.0, 200.0, 200.0, 250.0, 10.0, 10.0]).unwrap();
    let balanced = gray_world_white_balance(&image);
    assert!(balanced.data().iter().all(|&v| (0.0..=255.0).contains(&v)));
}

// ============================================================================
// Lab
// ============================================================================

#[test]
fn test_lab_white_balance_neutralizes_chroma_means() {
    let balanced = lab_white_balance(&tinted_image());
    let planes = LabPlanes::from_rgb(&balanced);

    let n = planes.chroma_a.len() as f32;
    let mean_a: f32 = planes.chroma_a.iter().sum::<f32>() / n;
    let mean_b: f32 = planes.chroma_b.iter().sum::<f32>() / n;

    // Gamut clipping on the way back to RGB can move chroma slightly
    assert!((mean_a - CHROMA_NEUTRAL).abs() < 1.5, "mean a = {}", mean_a);
    assert!((mean_b - CHROMA_NEUTRAL).abs() < 1.5, "mean b = {}", mean_b);
}

#[test]
fn test_lab_white_balance_keeps_lightness() {
    let image = tinted_image();
    let before = LabPlanes::from_rgb(&image);
    let after = LabPlanes::from_rgb(&lab_white_balance(&image));

    let mean = |v: &[f32]| v.iter().sum::<f32>() / v.len() as f32;
    assert!(
        (mean(&before.lightness) - mean(&after.lightness)).abs() < 3.0,
        "lightness drifted"
    );
}

#[test]
fn test_lab_white_balance_gray_is_unchanged() {
    let image = RgbImage::filled(3, 2, [120.0, 120.0, 120.0]).unwrap();
    let balanced = lab_white_balance(&image);

    for (a, b) in image.data().iter().zip(balanced.data()) {
        assert!((a - b).abs() < 0.5, "{} vs {}", a, b);
    }
}

#[test]
fn test_apply_white_balance_dispatch() {
    let image = tinted_image();
    assert_eq!(
        apply_white_balance(&image, WhiteBalanceMethod::GrayWorld),
        gray_world_white_balance(&image)
    );
    assert_eq!(
        apply_white_balance(&image, WhiteBalanceMethod::Lab),
        lab_white_balance(&image)
    );
}
