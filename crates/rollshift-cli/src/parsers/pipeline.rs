//! Parsers for pipeline option values.

use rollshift_core::decoders::ImageFormat;
use rollshift_core::{GammaSetting, WhiteBalanceMethod};

/// Parse a gamma value: a number, or `adaptive`.
pub fn parse_gamma(s: &str) -> Result<GammaSetting, String> {
    s.parse()
}

/// Parse a white balance method (`gray-world` or `lab`).
pub fn parse_white_balance(s: &str) -> Result<WhiteBalanceMethod, String> {
    s.parse()
}

/// Parse an output format by extension name (`jpg`, `png`, `tif`, ...).
pub fn parse_output_format(s: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_extension(s.trim().trim_start_matches('.')).ok_or_else(|| {
        format!(
            "Unknown output format '{}'. Valid: jpg, jpeg, png, tif, tiff",
            s
        )
    })
}
