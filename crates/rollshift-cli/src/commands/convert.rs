use std::path::PathBuf;
use std::time::Instant;

use rollshift_cli::{process_single_image, PipelineArgs};
use tracing::info;

/// Convert a single negative to a positive.
pub fn cmd_convert(
    input: PathBuf,
    out: Option<PathBuf>,
    pipeline: PipelineArgs,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let params = pipeline.processing_params()?;

    info!(
        mode = ?params.config.mode,
        white_balance = ?params.config.white_balance,
        gamma = %params.config.gamma,
        manual_base = params.base.is_some(),
        "converting {}",
        input.display()
    );

    let written = process_single_image(&input, out.as_deref(), &params)?;

    println!("Wrote {}", written.display());
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "done");
    Ok(())
}
