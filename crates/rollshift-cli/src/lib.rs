//! Shared utilities for rollshift-cli
//!
//! Argument structs, parsers and the per-image processing used by the
//! `rollshift` binary's commands.

pub mod args;
pub mod parsers;
pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use args::PipelineArgs;
pub use parsers::{parse_base_rgb, parse_gamma, parse_output_format, parse_white_balance};
pub use processing::{
    convert_file, determine_output_path, expand_inputs, load_config, measure_shared_base,
    plan_batch, process_single_image, run_batch, BatchJob, BatchReport, PipelineOverrides,
    ProcessingParams, DEFAULT_OUTPUT_FORMAT, SUPPORTED_EXTENSIONS,
};
