//! Rollshift Core Library
//!
//! Film negative to positive conversion: film base estimation, inversion,
//! white balance, retinex normalization, local contrast, gamma, and optional
//! denoise/sharpen, composed into an AUTO path and a MANUAL override path.

pub mod auto_adjust;
pub mod color;
pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod filters;
pub mod models;
pub mod pipeline;
pub mod raster;

// Re-export commonly used types
pub use color::{Lab, LabPlanes};
pub use error::{CodecError, ConfigError, DomainError, PipelineError, SessionError};
pub use models::{
    BaseColor, ChannelFactors, ClaheParams, GammaSetting, ManualAdjustments, PipelineConfig,
    PipelineMode, WhiteBalanceMethod,
};
pub use pipeline::{
    process_auto, process_auto_with_base, process_batch, process_image, process_image_with_base,
    process_manual, AutoOutput, Session, SessionState,
};
pub use raster::RgbImage;
