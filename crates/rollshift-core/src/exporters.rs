//! Image exporters for various output formats
//!
//! Positives are quantized once to 8-bit RGB here and written as JPEG, PNG
//! or TIFF.

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

use crate::decoders::ImageFormat;
use crate::error::{CodecError, DomainError};
use crate::raster::RgbImage;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Export by file extension with the default JPEG quality.
pub fn export_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<(), CodecError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    export_image_as(image, path, format, DEFAULT_JPEG_QUALITY)
}

/// Export in an explicit format. `jpeg_quality` (1-100) is ignored for
/// lossless formats.
///
/// The image is fully encoded before the target is opened, so a failed
/// encode never leaves a truncated file behind.
pub fn export_image_as<P: AsRef<Path>>(
    image: &RgbImage,
    path: P,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let bytes = encode_image(image, format, jpeg_quality)?;

    fs::write(path, &bytes).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        %format,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "exported image"
    );
    Ok(())
}

/// Encode to an in-memory file of the given format.
pub fn encode_image(
    image: &RgbImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, CodecError> {
    if image.is_empty() {
        return Err(DomainError::EmptyImage.into());
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => write_jpeg(image, &mut buffer, jpeg_quality)?,
        ImageFormat::Png => write_png(image, &mut buffer)?,
        ImageFormat::Tiff => write_tiff(image, &mut buffer)?,
    }
    Ok(buffer.into_inner())
}

/// Encode as JPEG in memory.
pub fn export_jpeg_to_bytes(image: &RgbImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    encode_image(image, ImageFormat::Jpeg, quality)
}

fn write_jpeg<W: Write>(image: &RgbImage, writer: W, quality: u8) -> Result<(), CodecError> {
    let mut encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
    encoder.encode(
        &image.to_u8(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

fn write_png<W: Write>(image: &RgbImage, writer: W) -> Result<(), CodecError> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&image.to_u8())?;
    png_writer.finish()?;
    Ok(())
}

fn write_tiff<W: Write + Seek>(image: &RgbImage, writer: W) -> Result<(), CodecError> {
    let mut encoder = tiff::encoder::TiffEncoder::new(writer)?;
    encoder.write_image::<tiff::encoder::colortype::RGB8>(
        image.width(),
        image.height(),
        &image.to_u8(),
    )?;
    Ok(())
}
