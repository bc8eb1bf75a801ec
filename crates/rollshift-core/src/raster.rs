//! In-memory RGB image used by every pipeline stage.

use crate::error::DomainError;

/// Largest sample value of the 8-bit-equivalent working range.
pub const SAMPLE_MAX: f32 = 255.0;

/// Interleaved 3-channel image with `f32` samples in [0, 255].
///
/// Samples keep their fractional part between stages so that no precision
/// is lost to intermediate quantization; [`RgbImage::to_u8`] rounds once at
/// egress.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl RgbImage {
    /// Wrap an interleaved RGB buffer.
    ///
    /// Samples are clamped to [0, 255]; non-finite samples are rejected.
    pub fn new(width: u32, height: u32, mut data: Vec<f32>) -> Result<Self, DomainError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(DomainError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        for (index, value) in data.iter_mut().enumerate() {
            if !value.is_finite() {
                return Err(DomainError::NonFiniteSample { index });
            }
            *value = clamp_sample(*value);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from 8-bit interleaved RGB.
    pub fn from_u8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, DomainError> {
        Self::new(width, height, bytes.iter().map(|&v| v as f32).collect())
    }

    /// Build from an interleaved buffer with `channels` samples per pixel.
    ///
    /// Only 3 channels are accepted; anything else is a [`DomainError::ChannelCount`].
    pub fn from_channels(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<f32>,
    ) -> Result<Self, DomainError> {
        if channels != 3 {
            return Err(DomainError::ChannelCount(channels));
        }
        Self::new(width, height, data)
    }

    /// Image filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [f32; 3]) -> Result<Self, DomainError> {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(width, height, data)
    }

    /// Internal constructor for stage outputs that are already clamped.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 3);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Samples of one row (`width * 3` values).
    pub fn row(&self, y: u32) -> &[f32] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// RGB triple at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Same-sized image produced by mapping every pixel.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn([f32; 3]) -> [f32; 3] + Sync,
    {
        let mut data = self.data.clone();
        crate::auto_adjust::parallel_for_each_pixel_mut(&mut data, |pixel| {
            let out = f([pixel[0], pixel[1], pixel[2]]);
            pixel[0] = clamp_sample(out[0]);
            pixel[1] = clamp_sample(out[1]);
            pixel[2] = clamp_sample(out[2]);
        });
        Self::from_raw(self.width, self.height, data)
    }

    /// Round and clamp to 8-bit interleaved RGB.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| quantize(v)).collect()
    }
}

/// Clamp a sample into [0, 255], mapping NaN to 0.
#[inline]
pub fn clamp_sample(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, SAMPLE_MAX)
    }
}

/// Round a working sample to its 8-bit value.
#[inline]
pub fn quantize(value: f32) -> u8 {
    clamp_sample(value).round() as u8
}
