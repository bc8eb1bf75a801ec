//! Tests for local contrast enhancement

use super::*;
use crate::color::LabPlanes;
use crate::raster::RgbImage;

fn scene(width: u32, height: u32) -> RgbImage {
    // Low-contrast scene: a soft diagonal ramp with a color tint
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let v = 90.0 + ((x + y) % 24) as f32;
            data.extend_from_slice(&[v + 20.0, v, v - 15.0]);
        }
    }
    RgbImage::new(width, height, data).unwrap()
}

fn range(values: &[f32]) -> f32 {
    let min = values.iter().copied().fold(f32::MAX, f32::min);
    let max = values.iter().copied().fold(f32::MIN, f32::max);
    max - min
}

#[test]
fn test_enhance_contrast_preserves_dimensions_and_range() {
    let image = scene(37, 23);
    let out = enhance_contrast(&image, &ClaheParams::default());

    assert_eq!(out.width(), 37);
    assert_eq!(out.height(), 23);
    assert_eq!(out.data().len(), image.data().len());
    assert!(out.data().iter().all(|&v| (0.0..=255.0).contains(&v)));
}

#[test]
fn test_chroma_planes_are_bit_identical() {
    let planes = LabPlanes::from_rgb(&scene(40, 30));
    let chroma_a = planes.chroma_a.clone();
    let chroma_b = planes.chroma_b.clone();
    let lightness = planes.lightness.clone();

    let enhanced = enhance_lightness(planes, &ClaheParams::default());

    assert_eq!(enhanced.chroma_a, chroma_a);
    assert_eq!(enhanced.chroma_b, chroma_b);
    assert_ne!(enhanced.lightness, lightness);
}

#[test]
fn test_clahe_stretches_low_contrast_plane() {
    let width = 64;
    let height = 64;
    let plane: Vec<f32> = (0..width * height)
        .map(|i| 100.0 + ((i % width) as f32 / width as f32) * 20.0)
        .collect();

    let params = ClaheParams {
        clip_limit: 40.0,
        tile_grid: 2,
    };
    let out = clahe_lightness(&plane, width, height, &params);

    assert_eq!(out.len(), plane.len());
    assert!(
        range(&out) > range(&plane),
        "range {} should exceed {}",
        range(&out),
        range(&plane)
    );
}

#[test]
fn test_clahe_uniform_plane_stays_uniform() {
    let plane = vec![128.0f32; 64 * 64];
    let out = clahe_lightness(&plane, 64, 64, &ClaheParams::default());
    let first = out[0];
    assert!(out.iter().all(|&v| v == first));
}

#[test]
fn test_clahe_plane_smaller_than_grid() {
    let plane = vec![10.0, 200.0, 90.0];
    let params = ClaheParams {
        clip_limit: 2.0,
        tile_grid: 8,
    };
    let out = clahe_lightness(&plane, 3, 1, &params);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|&v| (0.0..=255.0).contains(&v)));
}

#[test]
fn test_clahe_single_tile_and_higher_clip() {
    let plane: Vec<f32> = (0..32 * 32).map(|i| (i % 50) as f32 + 80.0).collect();

    let gentle = clahe_lightness(
        &plane,
        32,
        32,
        &ClaheParams {
            clip_limit: 1.0,
            tile_grid: 1,
        },
    );
    let strong = clahe_lightness(
        &plane,
        32,
        32,
        &ClaheParams {
            clip_limit: 40.0,
            tile_grid: 1,
        },
    );

    assert!(range(&strong) >= range(&gentle));
}

#[test]
fn test_enhance_contrast_is_deterministic() {
    let image = scene(50, 40);
    let params = ClaheParams::default();
    assert_eq!(
        enhance_contrast(&image, &params),
        enhance_contrast(&image, &params)
    );
}

#[test]
fn test_enhance_contrast_empty_image() {
    let image = RgbImage::new(0, 0, Vec::new()).unwrap();
    assert!(enhance_contrast(&image, &ClaheParams::default()).is_empty());
}
