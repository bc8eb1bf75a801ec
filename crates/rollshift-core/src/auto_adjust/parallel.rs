//! Parallelization helpers for image processing operations
//!
//! Every helper picks between a rayon and a sequential loop based on the
//! number of pixels. Both branches produce identical results: per-pixel maps
//! are independent, and reductions that involve floating point addition are
//! computed per row and summed in row order so the parallel split never
//! changes the rounding.

use rayon::prelude::*;

use super::PARALLEL_THRESHOLD;

/// Parallel fold/reduce over pixels with automatic threshold-based dispatch.
///
/// Only use this for reductions whose combine step is exact regardless of
/// grouping (min, max, counts). Floating point sums go through
/// [`parallel_map_rows`] instead.
///
/// # Example
/// ```ignore
/// let max = parallel_fold_reduce(
///     &data,
///     3,
///     || [0.0f32; 3],
///     |acc, pixel| [acc[0].max(pixel[0]), acc[1].max(pixel[1]), acc[2].max(pixel[2])],
///     |a, b| [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
/// );
/// ```
pub fn parallel_fold_reduce<T, A, I, F, R>(
    data: &[T],
    chunk_size: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    T: Sync,
    A: Send + Clone,
    I: Fn() -> A + Sync,
    F: Fn(A, &[T]) -> A + Sync,
    R: Fn(A, A) -> A + Sync,
{
    let num_elements = data.len() / chunk_size;

    if num_elements >= PARALLEL_THRESHOLD {
        data.par_chunks_exact(chunk_size)
            .fold(&init, &fold_fn)
            .reduce(&init, &reduce_fn)
    } else {
        let mut acc = init();
        for chunk in data.chunks_exact(chunk_size) {
            acc = fold_fn(acc, chunk);
        }
        acc
    }
}

/// Map every row of an interleaved buffer to a value, preserving row order.
///
/// `row_len` is the number of samples per row (`width * 3` for RGB).
pub fn parallel_map_rows<T, A, F>(data: &[T], row_len: usize, f: F) -> Vec<A>
where
    T: Sync,
    A: Send,
    F: Fn(&[T]) -> A + Sync,
{
    if row_len == 0 {
        return Vec::new();
    }

    if data.len() / 3 >= PARALLEL_THRESHOLD {
        data.par_chunks(row_len).map(&f).collect()
    } else {
        data.chunks(row_len).map(&f).collect()
    }
}

/// Per-channel sums of an interleaved RGB buffer.
///
/// Rows are summed independently and the row sums are added in order, so the
/// result is the same with or without the thread pool.
pub fn channel_sums(data: &[f32], width: usize) -> [f64; 3] {
    let rows = parallel_map_rows(data, width * 3, |row| {
        let mut sums = [0.0f64; 3];
        for pixel in row.chunks_exact(3) {
            sums[0] += pixel[0] as f64;
            sums[1] += pixel[1] as f64;
            sums[2] += pixel[2] as f64;
        }
        sums
    });

    rows.into_iter().fold([0.0f64; 3], |acc, row| {
        [acc[0] + row[0], acc[1] + row[1], acc[2] + row[2]]
    })
}

/// Per-channel maxima of an interleaved RGB buffer (0 for an empty buffer).
pub fn channel_max(data: &[f32]) -> [f32; 3] {
    parallel_fold_reduce(
        data,
        3,
        || [0.0f32; 3],
        |acc, pixel| {
            [
                acc[0].max(pixel[0]),
                acc[1].max(pixel[1]),
                acc[2].max(pixel[2]),
            ]
        },
        |a, b| [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
    )
}

/// Parallel for-each over mutable chunks with automatic threshold-based dispatch.
///
/// # Example
/// ```ignore
/// parallel_for_each_chunk_mut(&mut data, 3, |pixel| {
///     pixel[0] *= r_gain;
///     pixel[1] *= g_gain;
///     pixel[2] *= b_gain;
/// });
/// ```
pub fn parallel_for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, f: F)
where
    T: Send + Sync,
    F: Fn(&mut [T]) + Sync,
{
    let num_elements = data.len() / chunk_size;

    if num_elements >= PARALLEL_THRESHOLD {
        data.par_chunks_exact_mut(chunk_size).for_each(&f);
    } else {
        for chunk in data.chunks_exact_mut(chunk_size) {
            f(chunk);
        }
    }
}

/// [`parallel_for_each_chunk_mut`] over RGB pixels.
#[inline]
pub fn parallel_for_each_pixel_mut<F>(data: &mut [f32], f: F)
where
    F: Fn(&mut [f32]) + Sync,
{
    parallel_for_each_chunk_mut(data, 3, f);
}

/// Fill an output buffer row by row. `f` receives the row index and the
/// mutable row slice (`row_len` samples).
///
/// Used by the neighbourhood filters, which read from a separate source
/// image and write each output row independently.
pub fn parallel_for_each_row_mut<F>(out: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    if row_len == 0 {
        return;
    }

    if out.len() / 3 >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in out.chunks_mut(row_len).enumerate() {
            f(y, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(num_pixels: usize) -> Vec<f32> {
        let mut data = Vec::with_capacity(num_pixels * 3);
        for i in 0..num_pixels {
            let v = (i % 256) as f32 + 0.37;
            data.push(v); // R
            data.push(v * 0.5); // G
            data.push(v * 0.25); // B
        }
        data
    }

    #[test]
    fn test_channel_sums_small() {
        let data: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sums = channel_sums(&data, 2);

        assert!((sums[0] - 5.0).abs() < 0.001); // 1 + 4
        assert!((sums[1] - 7.0).abs() < 0.001); // 2 + 5
        assert!((sums[2] - 9.0).abs() < 0.001); // 3 + 6
    }

    #[test]
    fn test_channel_sums_match_sequential_row_order() {
        // Large enough for the parallel path
        let width = 300;
        let height = PARALLEL_THRESHOLD / width + 10;
        let data = gradient(width * height);

        let parallel = channel_sums(&data, width);

        let mut sequential = [0.0f64; 3];
        for row in data.chunks(width * 3) {
            let mut row_sum = [0.0f64; 3];
            for pixel in row.chunks_exact(3) {
                for c in 0..3 {
                    row_sum[c] += pixel[c] as f64;
                }
            }
            for c in 0..3 {
                sequential[c] += row_sum[c];
            }
        }

        // Bit-identical, not just close
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_channel_max() {
        let data = gradient(PARALLEL_THRESHOLD + 1000);
        let max = channel_max(&data);
        let top = 255.0f32 + 0.37;
        assert_eq!(max, [top, top * 0.5, top * 0.25]);

        assert_eq!(channel_max(&[]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parallel_map_rows_preserves_order() {
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let firsts = parallel_map_rows(&data, 3, |row| row[0]);
        assert_eq!(firsts, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_parallel_for_each_pixel_mut_large() {
        let num_pixels = PARALLEL_THRESHOLD + 1000;
        let mut data: Vec<f32> = vec![1.0; num_pixels * 3];
        let gains = [2.0f32, 0.5, 1.5];

        parallel_for_each_pixel_mut(&mut data, |pixel| {
            pixel[0] *= gains[0];
            pixel[1] *= gains[1];
            pixel[2] *= gains[2];
        });

        for pixel in data.chunks_exact(3) {
            assert_eq!(pixel, &[2.0, 0.5, 1.5]);
        }
    }

    #[test]
    fn test_parallel_for_each_row_mut_indices() {
        let mut out = vec![0.0f32; 4 * 6];
        parallel_for_each_row_mut(&mut out, 6, |y, row| {
            for v in row.iter_mut() {
                *v = y as f32;
            }
        });

        for (y, row) in out.chunks(6).enumerate() {
            assert!(row.iter().all(|&v| v == y as f32));
        }
    }
}
