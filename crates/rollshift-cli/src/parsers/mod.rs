//! Parsing functions for CLI arguments.

mod base;
mod pipeline;

pub use base::parse_base_rgb;
pub use pipeline::{parse_gamma, parse_output_format, parse_white_balance};
