//! Data models for rollshift
//!
//! Film base reference and the pipeline parameter bundle.

mod base_color;
mod pipeline_config;

pub use base_color::BaseColor;

pub use pipeline_config::{
    ChannelFactors, ClaheParams, GammaSetting, ManualAdjustments, PipelineConfig, PipelineMode,
    WhiteBalanceMethod, CHANNEL_FACTOR_RANGE, DEFAULT_BASE_SAMPLE_PERCENT, DEFAULT_GAMMA,
    DEFAULT_MAX_PIXELS, GAMMA_RANGE,
};
