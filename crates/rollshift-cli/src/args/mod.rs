//! Argument structs shared by CLI commands.

mod pipeline;

pub use pipeline::PipelineArgs;
