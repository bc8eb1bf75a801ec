//! Contrast-limited adaptive histogram equalization on a single plane.

use rayon::prelude::*;

use crate::models::ClaheParams;

const BINS: usize = 256;

/// Equalize a 0-255 plane tile by tile.
///
/// Each tile gets a 256-bin histogram clipped at
/// `clip_limit * tile_pixels / 256`; the clipped excess is spread uniformly
/// over all bins. The tile's CDF becomes a lookup table and every sample is
/// mapped through the four nearest tile tables, bilinearly weighted by its
/// distance to the tile centers. Tiles along the right and bottom edges
/// absorb any remainder pixels.
///
/// The grid is reduced to at most one tile per pixel along each axis, so
/// planes smaller than the grid still work.
pub fn clahe_lightness(plane: &[f32], width: usize, height: usize, params: &ClaheParams) -> Vec<f32> {
    if width == 0 || height == 0 || plane.len() != width * height {
        return plane.to_vec();
    }

    let grid = params.tile_grid.max(1) as usize;
    let tiles_x = grid.min(width);
    let tiles_y = grid.min(height);
    let tile_w = width / tiles_x;
    let tile_h = height / tiles_y;

    let maps: Vec<[f32; BINS]> = (0..tiles_x * tiles_y)
        .into_par_iter()
        .map(|idx| {
            let tx = idx % tiles_x;
            let ty = idx / tiles_x;
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = if tx == tiles_x - 1 { width } else { x0 + tile_w };
            let y1 = if ty == tiles_y - 1 { height } else { y0 + tile_h };

            let mut hist = [0u32; BINS];
            for row in y0..y1 {
                for &value in &plane[row * width + x0..row * width + x1] {
                    hist[bin(value)] += 1;
                }
            }

            tile_mapping(hist, (x1 - x0) * (y1 - y0), params.clip_limit)
        })
        .collect();

    let tw = tile_w as f32;
    let th = tile_h as f32;
    let mut out = vec![0.0f32; plane.len()];

    out.par_chunks_mut(width).enumerate().for_each(|(y, out_row)| {
        let fy = (y as f32 + 0.5) / th - 0.5;
        let (ty0, ty1, ay) = neighbours(fy, tiles_y);

        for (x, slot) in out_row.iter_mut().enumerate() {
            let value = bin(plane[y * width + x]);

            let fx = (x as f32 + 0.5) / tw - 0.5;
            let (tx0, tx1, ax) = neighbours(fx, tiles_x);

            let v00 = maps[ty0 * tiles_x + tx0][value];
            let v10 = maps[ty0 * tiles_x + tx1][value];
            let v01 = maps[ty1 * tiles_x + tx0][value];
            let v11 = maps[ty1 * tiles_x + tx1][value];

            let top = v00 * (1.0 - ax) + v10 * ax;
            let bottom = v01 * (1.0 - ax) + v11 * ax;
            *slot = (top * (1.0 - ay) + bottom * ay).clamp(0.0, 255.0);
        }
    });

    out
}

#[inline]
fn bin(value: f32) -> usize {
    (value.round().clamp(0.0, 255.0)) as usize
}

/// Lower/upper tile index and the interpolation weight toward the upper one.
#[inline]
fn neighbours(f: f32, tiles: usize) -> (usize, usize, f32) {
    let last = tiles as i64 - 1;
    let base = f.floor();
    let t0 = (base as i64).clamp(0, last) as usize;
    let t1 = (base as i64 + 1).clamp(0, last) as usize;
    (t0, t1, f - base)
}

/// Clip the histogram, redistribute the excess, and turn the CDF into a LUT.
///
/// The excess is spread evenly: every bin gets `excess / 256`, and the
/// remainder is handed out one count at a time at a fixed stride across the
/// whole range. The LUT scales the CDF by `255 / tile_pixels`.
fn tile_mapping(mut hist: [u32; BINS], tile_pixels: usize, clip_limit: f32) -> [f32; BINS] {
    let clip = ((clip_limit * tile_pixels as f32 / BINS as f32) as u32).max(1);

    let mut excess = 0u32;
    for count in hist.iter_mut() {
        if *count > clip {
            excess += *count - clip;
            *count = clip;
        }
    }

    let per_bin = excess / BINS as u32;
    let mut residual = excess as usize % BINS;
    for count in hist.iter_mut() {
        *count += per_bin;
    }
    if residual > 0 {
        let step = (BINS / residual).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }

    let scale = 255.0 / tile_pixels.max(1) as f32;
    let mut map = [0.0f32; BINS];
    let mut running = 0u32;
    for (slot, &count) in map.iter_mut().zip(hist.iter()) {
        running += count;
        *slot = (running as f32 * scale).min(255.0);
    }
    map
}
