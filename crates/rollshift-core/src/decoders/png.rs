//! PNG image decoder

use std::io::{BufRead, Seek};

use super::normalized_to_rgb;
use crate::error::CodecError;
use crate::raster::RgbImage;

/// Decode a PNG stream.
///
/// Palette and sub-byte images are expanded to 8-bit by the decoder, so the
/// output is always 8 or 16-bit gray, gray+alpha, RGB or RGBA.
pub(crate) fn decode_png<R: BufRead + Seek>(reader: R) -> Result<RgbImage, CodecError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(CodecError::UnsupportedFormat(
                "indexed PNG".to_string(),
            ))
        }
    };

    let buffer_size = reader.output_buffer_size().ok_or_else(|| {
        CodecError::UnsupportedFormat("PNG dimensions overflow the output buffer".to_string())
    })?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..frame_info.buffer_size()];

    match bit_depth {
        png::BitDepth::Eight => normalized_to_rgb(
            bytes.iter().map(|&v| v as f32 / 255.0),
            width,
            height,
            channels,
        ),
        // PNG 16-bit is big-endian
        png::BitDepth::Sixteen => normalized_to_rgb(
            bytes
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]) as f32 / 65535.0),
            width,
            height,
            channels,
        ),
        other => Err(CodecError::UnsupportedFormat(format!(
            "PNG bit depth {:?}",
            other
        ))),
    }
}
