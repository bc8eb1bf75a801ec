//! Planar lightness/chroma representation on an 8-bit scale.
//!
//! Lightness is `L* * 255 / 100`, chroma planes are `a* + 128` and
//! `b* + 128`, so a neutral pixel has both chroma planes at 128.

use rayon::prelude::*;

use super::lab::{lab_to_srgb8, srgb8_to_lab, Lab};
use crate::raster::RgbImage;

/// Neutral chroma value on the 8-bit scale.
pub const CHROMA_NEUTRAL: f32 = 128.0;

const L_SCALE: f32 = 255.0 / 100.0;

/// Rows per rayon task when converting.
const ROWS_PER_TASK: usize = 16;

/// Lightness and chroma planes of an image, one value per pixel each.
#[derive(Debug, Clone, PartialEq)]
pub struct LabPlanes {
    pub width: u32,
    pub height: u32,
    /// Lightness, 0-255
    pub lightness: Vec<f32>,
    /// Green-red chroma, 128 = neutral
    pub chroma_a: Vec<f32>,
    /// Blue-yellow chroma, 128 = neutral
    pub chroma_b: Vec<f32>,
}

impl LabPlanes {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let pixels = image.pixel_count();
        let mut lightness = vec![0.0f32; pixels];
        let mut chroma_a = vec![0.0f32; pixels];
        let mut chroma_b = vec![0.0f32; pixels];

        let width = image.width() as usize;
        let chunk = (width * ROWS_PER_TASK).max(1);

        lightness
            .par_chunks_mut(chunk)
            .zip(chroma_a.par_chunks_mut(chunk))
            .zip(chroma_b.par_chunks_mut(chunk))
            .zip(image.data().par_chunks(chunk * 3))
            .for_each(|(((l_out, a_out), b_out), rgb)| {
                for (i, pixel) in rgb.chunks_exact(3).enumerate() {
                    let lab = srgb8_to_lab([pixel[0], pixel[1], pixel[2]]);
                    l_out[i] = (lab.l * L_SCALE).clamp(0.0, 255.0);
                    a_out[i] = lab.a + CHROMA_NEUTRAL;
                    b_out[i] = lab.b + CHROMA_NEUTRAL;
                }
            });

        Self {
            width: image.width(),
            height: image.height(),
            lightness,
            chroma_a,
            chroma_b,
        }
    }

    pub fn to_rgb(&self) -> RgbImage {
        let pixels = self.lightness.len();
        let mut data = vec![0.0f32; pixels * 3];
        let chunk = (self.width as usize * ROWS_PER_TASK).max(1);

        data.par_chunks_mut(chunk * 3)
            .zip(self.lightness.par_chunks(chunk))
            .zip(self.chroma_a.par_chunks(chunk))
            .zip(self.chroma_b.par_chunks(chunk))
            .for_each(|(((rgb_out, l), a), b)| {
                for (i, pixel) in rgb_out.chunks_exact_mut(3).enumerate() {
                    let lab = Lab {
                        l: l[i] / L_SCALE,
                        a: a[i] - CHROMA_NEUTRAL,
                        b: b[i] - CHROMA_NEUTRAL,
                    };
                    pixel.copy_from_slice(&lab_to_srgb8(lab));
                }
            });

        RgbImage::from_raw(self.width, self.height, data)
    }
}
