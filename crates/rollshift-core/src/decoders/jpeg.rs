//! JPEG image decoder

use std::io::{BufRead, Seek};

use crate::error::CodecError;
use crate::raster::RgbImage;

/// Decode a baseline or progressive JPEG. CMYK and grayscale JPEGs are
/// converted to RGB by the decoder.
pub(crate) fn decode_jpeg<R: BufRead + Seek>(reader: R) -> Result<RgbImage, CodecError> {
    let decoded = image::load(reader, image::ImageFormat::Jpeg)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    Ok(RgbImage::from_u8(width, height, decoded.as_raw())?)
}
