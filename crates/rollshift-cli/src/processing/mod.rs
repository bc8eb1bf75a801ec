//! Processing helpers shared by the convert and batch commands.

mod batch;
mod input;
mod params;
mod single;

pub use batch::{measure_shared_base, plan_batch, run_batch, BatchJob, BatchReport};
pub use input::{determine_output_path, expand_inputs, DEFAULT_OUTPUT_FORMAT, SUPPORTED_EXTENSIONS};
pub use params::{load_config, PipelineOverrides, ProcessingParams};
pub use single::{convert_file, process_single_image};
