//! Image decoders for various formats
//!
//! PNG and TIFF through their codec crates, JPEG through `image`. Every
//! decoder produces an [`RgbImage`] on the 0-255 working scale: grayscale is
//! expanded to RGB, alpha is dropped, and 16-bit or float samples are
//! rescaled.

mod jpeg;
mod png;
mod tiff;


use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use tracing::debug;

use crate::error::CodecError;
use crate::raster::{RgbImage, SAMPLE_MAX};

/// File formats the decoders and exporters understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Tiff,
    Jpeg,
}

impl ImageFormat {
    /// Format for a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                CodecError::UnsupportedFormat(format!("{} has no file extension", path.display()))
            })?;
        Self::from_extension(ext).ok_or_else(|| CodecError::UnsupportedFormat(ext.to_string()))
    }

    /// Preferred file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Tiff => "tif",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode an image from a file path, choosing the decoder by extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, CodecError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    let file = File::open(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let image = match format {
        ImageFormat::Png => png::decode_png(reader)?,
        ImageFormat::Tiff => tiff::decode_tiff(reader)?,
        ImageFormat::Jpeg => jpeg::decode_jpeg(reader)?,
    };

    debug!(
        path = %path.display(),
        %format,
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image)
}

/// Decode an in-memory encoded image.
pub fn decode_image_from_bytes(bytes: &[u8], format: ImageFormat) -> Result<RgbImage, CodecError> {
    let reader = Cursor::new(bytes);
    match format {
        ImageFormat::Png => png::decode_png(reader),
        ImageFormat::Tiff => tiff::decode_tiff(reader),
        ImageFormat::Jpeg => jpeg::decode_jpeg(reader),
    }
}

/// Expand normalized (0.0-1.0) samples with `channels` per pixel to an
/// RGB image on the 0-255 scale.
///
/// 1 channel is gray, 2 is gray + alpha, 3 is RGB and 4 is RGBA.
pub(crate) fn normalized_to_rgb(
    samples: impl ExactSizeIterator<Item = f32>,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<RgbImage, CodecError> {
    let pixels = width as usize * height as usize;
    if samples.len() != pixels * channels {
        return Err(CodecError::UnsupportedFormat(format!(
            "buffer size mismatch: expected {}, got {}",
            pixels * channels,
            samples.len()
        )));
    }

    let samples: Vec<f32> = samples.map(|v| v * SAMPLE_MAX).collect();
    let mut rgb = Vec::with_capacity(pixels * 3);
    match channels {
        1 | 2 => {
            for pixel in samples.chunks_exact(channels) {
                rgb.extend_from_slice(&[pixel[0], pixel[0], pixel[0]]);
            }
        }
        3 => rgb = samples,
        4 => {
            for pixel in samples.chunks_exact(4) {
                rgb.extend_from_slice(&pixel[..3]);
            }
        }
        other => {
            return Err(CodecError::UnsupportedFormat(format!(
                "{} channels per pixel",
                other
            )))
        }
    }

    Ok(RgbImage::new(width, height, rgb)?)
}
