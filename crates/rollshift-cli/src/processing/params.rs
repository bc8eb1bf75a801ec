//! Processing parameters assembled from config files and command line flags.

use std::path::Path;

use anyhow::Context;
use rollshift_core::config::{load_pipeline_config, read_config_file};
use rollshift_core::decoders::ImageFormat;
use rollshift_core::exporters::DEFAULT_JPEG_QUALITY;
use rollshift_core::{
    BaseColor, ConfigError, GammaSetting, PipelineConfig, PipelineMode, WhiteBalanceMethod,
};
use tracing::{debug, info};

/// Command line overrides layered on top of the loaded config.
///
/// `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct PipelineOverrides {
    pub gamma: Option<GammaSetting>,
    pub white_balance: Option<WhiteBalanceMethod>,
    pub manual: bool,
    pub red: Option<f32>,
    pub green: Option<f32>,
    pub blue: Option<f32>,
    pub manual_gamma: Option<f32>,
    pub denoise: Option<f32>,
    pub sharpen: Option<f32>,
}

impl PipelineOverrides {
    /// Apply the overrides and validate the result.
    pub fn apply(&self, mut config: PipelineConfig) -> Result<PipelineConfig, ConfigError> {
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(method) = self.white_balance {
            config.white_balance = method;
        }
        if self.manual {
            config.mode = PipelineMode::Manual;
        }
        if let Some(red) = self.red {
            config.channel_factors.red = red;
        }
        if let Some(green) = self.green {
            config.channel_factors.green = green;
        }
        if let Some(blue) = self.blue {
            config.channel_factors.blue = blue;
        }
        if let Some(gamma) = self.manual_gamma {
            config.manual_gamma = gamma;
        }
        if let Some(strength) = self.denoise {
            config.denoise_strength = strength;
        }
        if let Some(amount) = self.sharpen {
            config.sharpen_amount = amount;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parameters for processing a single image.
/// Used by both convert and batch commands to avoid duplication.
#[derive(Debug, Clone)]
pub struct ProcessingParams {
    pub config: PipelineConfig,
    /// Film base to use instead of estimating one per image
    pub base: Option<BaseColor>,
    pub format: Option<ImageFormat>,
    pub jpeg_quality: u8,
}

impl ProcessingParams {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            base: None,
            format: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Load the pipeline config.
///
/// An explicit `--config` path must load; otherwise the usual search runs
/// and falls back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    if let Some(path) = path {
        let config = read_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        info!(source = %path.display(), "using pipeline config");
        return Ok(config);
    }

    let handle = load_pipeline_config(None);
    for warning in &handle.warnings {
        debug!("{}", warning);
    }
    if let Some(source) = &handle.source {
        info!(source = %source.display(), "using pipeline config");
    }
    Ok(handle.config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = PipelineConfig::default();
        let applied = PipelineOverrides::default().apply(config.clone()).unwrap();
        assert_eq!(applied, config);
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = PipelineOverrides {
            gamma: Some(GammaSetting::Adaptive),
            white_balance: Some(WhiteBalanceMethod::Lab),
            manual: true,
            red: Some(1.2),
            blue: Some(0.8),
            manual_gamma: Some(0.9),
            sharpen: Some(0.5),
            ..Default::default()
        };
        let config = overrides.apply(PipelineConfig::default()).unwrap();

        assert_eq!(config.gamma, GammaSetting::Adaptive);
        assert_eq!(config.white_balance, WhiteBalanceMethod::Lab);
        assert_eq!(config.mode, PipelineMode::Manual);
        assert_eq!(config.channel_factors.as_array(), [1.2, 1.0, 0.8]);
        assert_eq!(config.manual_gamma, 0.9);
        assert_eq!(config.sharpen_amount, 0.5);
        assert_eq!(config.denoise_strength, 0.0);
    }

    #[test]
    fn test_overrides_out_of_range() {
        let overrides = PipelineOverrides {
            green: Some(3.0),
            ..Default::default()
        };
        let err = overrides.apply(PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "channel_factors.green",
                ..
            }
        ));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yml");
        std::fs::write(&path, "white_balance: lab\nsharpen_amount: 0.3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.white_balance, WhiteBalanceMethod::Lab);
        assert_eq!(config.sharpen_amount, 0.3);

        assert!(load_config(Some(&dir.path().join("missing.yml"))).is_err());
    }
}
