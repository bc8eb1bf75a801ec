//! TIFF image decoder

use std::io::{Read, Seek};

use tiff::decoder::{Decoder, DecodingResult, Limits};

use super::normalized_to_rgb;
use crate::error::CodecError;
use crate::raster::RgbImage;

/// Decode a TIFF stream
pub(crate) fn decode_tiff<R: Read + Seek>(reader: R) -> Result<RgbImage, CodecError> {
    // Configure limits for large film scans (up to 1GB uncompressed)
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = Decoder::new(reader)?.with_limits(limits);
    let (width, height) = decoder.dimensions()?;
    let color_type = decoder.colortype()?;

    let channels = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::GrayA(_) => 2,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        other => {
            return Err(CodecError::UnsupportedFormat(format!(
                "TIFF color type {:?}",
                other
            )))
        }
    };

    match decoder.read_image()? {
        DecodingResult::U8(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::U16(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::U32(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::U64(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::F32(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::F64(buf) => decode_buffer(&buf, width, height, channels),
        DecodingResult::F16(buf) => {
            let f32_buf: Vec<f32> = buf.iter().map(|&v| v.to_f32()).collect();
            decode_buffer(&f32_buf, width, height, channels)
        }
        DecodingResult::I8(_)
        | DecodingResult::I16(_)
        | DecodingResult::I32(_)
        | DecodingResult::I64(_) => Err(CodecError::UnsupportedFormat(
            "signed integer TIFF samples".to_string(),
        )),
    }
}

/// Trait for TIFF sample types that can be normalized to f32
trait TiffValue: Copy {
    /// Normalize this value to f32 in range [0.0, 1.0]
    fn to_normalized_f32(self) -> f32;
}

impl TiffValue for u8 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self as f32 / 255.0
    }
}

impl TiffValue for u16 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self as f32 / 65535.0
    }
}

impl TiffValue for u32 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        (self as f64 / u32::MAX as f64) as f32
    }
}

impl TiffValue for u64 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        (self as f64 / u64::MAX as f64) as f32
    }
}

impl TiffValue for f32 {
    /// Float TIFFs are already normalized; out-of-range values are clamped
    /// later by the image constructor.
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        if self.is_finite() {
            self
        } else {
            0.0
        }
    }
}

impl TiffValue for f64 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        (self as f32).to_normalized_f32()
    }
}

fn decode_buffer<T: TiffValue>(
    buf: &[T],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<RgbImage, CodecError> {
    normalized_to_rgb(
        buf.iter().map(|&v| v.to_normalized_f32()),
        width,
        height,
        channels,
    )
}
