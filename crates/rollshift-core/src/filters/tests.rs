//! Tests for the sharpen and denoise filters

use super::*;
use crate::raster::RgbImage;

fn checker(width: u32, height: u32) -> RgbImage {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 80.0 } else { 120.0 };
            data.extend_from_slice(&[v, v * 0.8, v * 1.2]);
        }
    }
    RgbImage::new(width, height, data).unwrap()
}

fn noisy_flat(width: u32, height: u32) -> RgbImage {
    // Deterministic +-4 pattern around 100
    let mut data = Vec::new();
    for i in 0..(width * height) {
        let n = ((i * 7919) % 9) as f32 - 4.0;
        data.extend_from_slice(&[100.0 + n, 100.0 - n, 100.0 + n / 2.0]);
    }
    RgbImage::new(width, height, data).unwrap()
}

fn variance(image: &RgbImage) -> f32 {
    let data = image.data();
    let mean = data.iter().sum::<f32>() / data.len() as f32;
    data.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / data.len() as f32
}

// ============================================================================
// Sharpen
// ============================================================================

#[test]
fn test_sharpen_zero_amount_is_identity() {
    let image = checker(5, 4);
    assert_eq!(sharpen(&image, 0.0), image);
}

#[test]
fn test_sharpen_uniform_image_unchanged_including_borders() {
    let image = RgbImage::filled(6, 5, [37.0, 142.0, 211.0]).unwrap();
    for amount in [0.5, 1.0, 2.0] {
        let out = sharpen(&image, amount);
        assert_eq!(out, image, "amount {}", amount);
    }
}

#[test]
fn test_sharpen_edge_replication_at_corner() {
    // 2x2 single-channel-like image: top-left corner taps clamp onto itself
    let image = RgbImage::new(
        2,
        2,
        vec![
            100.0, 100.0, 100.0, 60.0, 60.0, 60.0, //
            40.0, 40.0, 40.0, 20.0, 20.0, 20.0,
        ],
    )
    .unwrap();
    let out = sharpen(&image, 1.0);

    // (0,0): up and left replicate the pixel itself
    // 5*100 - 100 (up) - 100 (left) - 60 (right) - 40 (down) = 200
    assert_eq!(out.pixel(0, 0), [200.0, 200.0, 200.0]);

    // (1,1): down and right replicate the pixel itself
    // 5*20 - 60 (up) - 40 (left) - 20 - 20 = -40 -> clipped to 0
    assert_eq!(out.pixel(1, 1), [0.0, 0.0, 0.0]);
}

#[test]
fn test_sharpen_half_amount_blends() {
    let image = RgbImage::new(
        3,
        1,
        vec![50.0, 50.0, 50.0, 100.0, 100.0, 100.0, 50.0, 50.0, 50.0],
    )
    .unwrap();
    let full = sharpen(&image, 1.0);
    let half = sharpen(&image, 0.5);

    // center: 5*100 - 100 - 100 - 50 - 50 = 200
    assert_eq!(full.pixel(1, 0)[0], 200.0);
    assert_eq!(half.pixel(1, 0)[0], 150.0);
}

#[test]
fn test_sharpen_increases_local_contrast() {
    let image = checker(8, 8);
    let out = sharpen(&image, 1.0);
    assert!(variance(&out) > variance(&image));
    assert!(out.data().iter().all(|&v| (0.0..=255.0).contains(&v)));
}

// ============================================================================
// Denoise
// ============================================================================

#[test]
fn test_denoise_zero_strength_is_identity() {
    let image = noisy_flat(6, 6);
    assert_eq!(denoise(&image, 0.0), image);
}

#[test]
fn test_denoise_reduces_noise() {
    let image = noisy_flat(16, 16);
    let out = denoise(&image, 10.0);

    assert_eq!(out.width(), 16);
    assert_eq!(out.height(), 16);
    assert!(variance(&out) < variance(&image));
}

#[test]
fn test_denoise_preserves_strong_edge() {
    // Left half dark, right half bright
    let mut data = Vec::new();
    for _y in 0..8 {
        for x in 0..8 {
            let v = if x < 4 { 20.0 } else { 230.0 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    let image = RgbImage::new(8, 8, data).unwrap();
    let out = denoise(&image, 2.0);

    // sigma_r = 6, a 210-unit step carries essentially zero range weight
    assert!((out.pixel(3, 4)[0] - 20.0).abs() < 0.01);
    assert!((out.pixel(4, 4)[0] - 230.0).abs() < 0.01);
}

#[test]
fn test_denoise_uniform_image_stays_uniform() {
    let image = RgbImage::filled(5, 5, [64.0, 128.0, 192.0]).unwrap();
    let out = denoise(&image, 5.0);
    for (a, b) in image.data().iter().zip(out.data()) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn test_denoise_is_deterministic() {
    let image = noisy_flat(20, 12);
    assert_eq!(denoise(&image, 4.0), denoise(&image, 4.0));
}
