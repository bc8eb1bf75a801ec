//! Unsharp-style 3x3 convolution

use crate::auto_adjust::parallel_for_each_row_mut;
use crate::raster::{clamp_sample, RgbImage};

/// Center pixel against its 4-neighbourhood.
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Blend the kernel response with the input:
/// `out = in + amount * (kernel(in) - in)`.
///
/// `amount = 1` is the plain kernel, `0` returns the input unchanged.
/// Out-of-bounds taps replicate the nearest edge pixel, so a flat image
/// stays flat all the way to its borders.
pub fn sharpen(image: &RgbImage, amount: f32) -> RgbImage {
    if amount == 0.0 || image.is_empty() {
        return image.clone();
    }

    let width = image.width() as usize;
    let height = image.height() as usize;
    let src = image.data();
    let row_len = width * 3;
    let mut out = vec![0.0f32; src.len()];

    parallel_for_each_row_mut(&mut out, row_len, |y, row| {
        for x in 0..width {
            for c in 0..3 {
                let mut acc = 0.0f32;
                for (ky, kernel_row) in SHARPEN_KERNEL.iter().enumerate() {
                    let sy = replicate(y, ky, height);
                    for (kx, &weight) in kernel_row.iter().enumerate() {
                        if weight == 0.0 {
                            continue;
                        }
                        let sx = replicate(x, kx, width);
                        acc += weight * src[(sy * width + sx) * 3 + c];
                    }
                }
                let center = src[(y * width + x) * 3 + c];
                row[x * 3 + c] = clamp_sample(center + amount * (acc - center));
            }
        }
    });

    RgbImage::from_raw(image.width(), image.height(), out)
}

/// Coordinate of kernel tap `k` (0..3) around `pos`, clamped into `0..len`.
#[inline]
fn replicate(pos: usize, k: usize, len: usize) -> usize {
    (pos + k).saturating_sub(1).min(len - 1)
}
