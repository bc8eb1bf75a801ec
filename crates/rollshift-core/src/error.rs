//! Error types for the rollshift pipeline
//!
//! - [`DomainError`]: degenerate or malformed image data
//! - [`ConfigError`]: configuration values outside their documented range
//! - [`SessionError`]: invalid state transitions on a [`crate::pipeline::Session`]
//! - [`CodecError`]: decoding/encoding failures at the file boundary
//!
//! [`PipelineError`] is what the orchestrator returns; it wraps the
//! originating error unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or degenerate input data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("expected 3 channels per pixel, got {0}")]
    ChannelCount(u8),

    #[error("buffer length {actual} does not match {width}x{height}x3 = {expected}")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },

    #[error("image has {pixels} pixels, limit is {max}")]
    ImageTooLarge { pixels: u64, max: u64 },

    #[error("film base channel {channel} is {value}, must be strictly positive")]
    DegenerateBase { channel: usize, value: f32 },

    #[error("gamma {0} is invalid, must be finite and > 0")]
    InvalidGamma(f32),
}

/// Configuration value outside its valid range, or an unreadable config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside the valid range {range}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Action attempted on a session in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

/// Error returned by the pipeline orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Failure while decoding or encoding an image file.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JPEG error: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
