use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use rollshift_cli::{
    expand_inputs, measure_shared_base, plan_batch, run_batch, PipelineArgs, SUPPORTED_EXTENSIONS,
};
use tracing::info;

/// Convert many negatives in parallel.
///
/// With `shared_base` the film base is measured once on the first frame and
/// reused for the whole roll, unless `--base` already fixes it.
pub fn cmd_batch(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    threads: Option<usize>,
    recursive: bool,
    shared_base: bool,
    pipeline: PipelineArgs,
) -> anyhow::Result<()> {
    let batch_start = Instant::now();

    if inputs.is_empty() {
        bail!("No input files or directories specified");
    }

    // Expand directories to file lists
    let inputs = expand_inputs(&inputs, recursive).map_err(anyhow::Error::msg)?;
    if inputs.is_empty() {
        bail!(
            "No supported image files found (supported: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    println!("Found {} image files to process", inputs.len());

    // Configure thread pool if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        info!(threads = num_threads, "configured thread pool");
    }

    if let Some(dir) = &out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut params = pipeline.processing_params()?;
    let jobs = plan_batch(&inputs, out.as_deref(), params.format).map_err(anyhow::Error::msg)?;

    if shared_base && params.base.is_none() {
        let first = &jobs[0].input;
        let base = measure_shared_base(first, &params)?;
        let [r, g, b] = base.rgb();
        println!(
            "Shared base from {}: [{:.1}, {:.1}, {:.1}]",
            first.display(),
            r,
            g,
            b
        );
        params.base = Some(base);
    }

    let report = run_batch(jobs, &params);
    println!(
        "Processed {} of {} images in {:.2}s",
        report.total() - report.failure_count(),
        report.total(),
        batch_start.elapsed().as_secs_f64()
    );

    report.into_result()?;
    Ok(())
}
