//! Single image processing functions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rollshift_core::decoders::{decode_image, ImageFormat};
use rollshift_core::exporters::export_image_as;
use rollshift_core::{process_image, process_image_with_base};
use tracing::{debug, info_span};

use super::input::determine_output_path;
use super::params::ProcessingParams;

/// Decode, convert and export one image. Returns the path written.
pub fn process_single_image(
    input: &Path,
    out: Option<&Path>,
    params: &ProcessingParams,
) -> anyhow::Result<PathBuf> {
    let (output_path, format) =
        determine_output_path(input, out, params.format).map_err(anyhow::Error::msg)?;
    convert_file(input, &output_path, format, params)?;
    Ok(output_path)
}

/// Decode `input`, convert it and write the positive to `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    format: ImageFormat,
    params: &ProcessingParams,
) -> anyhow::Result<()> {
    let _span = info_span!("image", input = %input.display()).entered();

    let negative =
        decode_image(input).with_context(|| format!("Failed to decode {}", input.display()))?;
    debug!(
        width = negative.width(),
        height = negative.height(),
        "decoded negative"
    );

    let positive = match &params.base {
        Some(base) => process_image_with_base(&negative, base, &params.config),
        None => process_image(&negative, &params.config),
    }
    .with_context(|| format!("Failed to convert {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    export_image_as(&positive, output, format, params.jpeg_quality)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
