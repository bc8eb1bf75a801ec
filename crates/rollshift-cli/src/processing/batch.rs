//! Batch processing across a roll.

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Context};
use rollshift_core::decoders::{decode_image, ImageFormat};
use rollshift_core::pipeline::estimate_base;
use rollshift_core::BaseColor;
use tracing::{error, warn};

use super::input::determine_output_path;
use super::params::ProcessingParams;
use super::single::convert_file;

/// One input and where its positive goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ImageFormat,
}

/// Assign every input a distinct output path.
///
/// With `out_dir` every positive lands in that directory, otherwise next to
/// its input. Inputs that would map to the same file (the same stem in two
/// subdirectories, or one stem with two extensions) get `_2`, `_3`, ...
/// suffixes in input order.
pub fn plan_batch(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    format: Option<ImageFormat>,
) -> Result<Vec<BatchJob>, String> {
    let mut taken = HashSet::new();
    let mut jobs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let (beside_input, format) = determine_output_path(input, None, format)?;
        let output = match (out_dir, beside_input.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => beside_input,
        };

        let unique = unique_output_path(&output, &mut taken);
        if unique != output {
            warn!(
                input = %input.display(),
                output = %unique.display(),
                "output name already used in this batch, writing with a suffix"
            );
        }

        jobs.push(BatchJob {
            input: input.clone(),
            output: unique,
            format,
        });
    }

    Ok(jobs)
}

fn unique_output_path(path: &Path, taken: &mut HashSet<PathBuf>) -> PathBuf {
    if taken.insert(path.to_path_buf()) {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n = 2;
    loop {
        let name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = path.with_file_name(name);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Measure the film base on one frame, for reuse across the roll.
pub fn measure_shared_base(frame: &Path, params: &ProcessingParams) -> anyhow::Result<BaseColor> {
    let negative =
        decode_image(frame).with_context(|| format!("Failed to decode {}", frame.display()))?;
    estimate_base(&negative, params.config.base_sample_percent)
        .with_context(|| format!("Failed to estimate base from {}", frame.display()))
}

/// Outcome of every job, in job order.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<(BatchJob, anyhow::Result<()>)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&BatchJob, &anyhow::Error)> {
        self.results
            .iter()
            .filter_map(|(job, result)| result.as_ref().err().map(|err| (job, err)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Paths written, or an error naming every input that failed.
    pub fn into_result(self) -> anyhow::Result<Vec<PathBuf>> {
        let total = self.total();
        let failed = self.failure_count();
        if failed == 0 {
            return Ok(self.results.into_iter().map(|(job, _)| job.output).collect());
        }

        let mut message = format!("{} of {} images failed", failed, total);
        for (job, err) in self.failures() {
            message.push_str(&format!("\n  {}: {:#}", job.input.display(), err));
        }
        Err(anyhow!(message))
    }
}

/// Convert every job in parallel. A failing file does not stop the others.
pub fn run_batch(jobs: Vec<BatchJob>, params: &ProcessingParams) -> BatchReport {
    let total = jobs.len();
    let completed = AtomicUsize::new(0);

    let results = jobs
        .into_par_iter()
        .map(|job| {
            let result = convert_file(&job.input, &job.output, job.format, params);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            match &result {
                Ok(()) => println!("[{}/{}] {}", done, total, job.output.display()),
                Err(err) => error!(input = %job.input.display(), "{:#}", err),
            }
            (job, result)
        })
        .collect();

    BatchReport { results }
}
