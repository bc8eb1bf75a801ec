//! Enums for pipeline configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which sequence the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Fully automatic conversion
    #[default]
    Auto,

    /// Automatic conversion up to the pre-gamma baseline, then user gamma
    /// and per-channel factors
    Manual,
}

impl FromStr for PipelineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("Unknown pipeline mode '{}'. Valid: auto, manual", s)),
        }
    }
}

/// White balance strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteBalanceMethod {
    /// Scale channels so their means meet the grand mean
    #[default]
    GrayWorld,

    /// Shift Lab chroma means to neutral, leaving lightness untouched
    Lab,
}

impl FromStr for WhiteBalanceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gray-world" | "grayworld" | "gray" | "grey-world" => Ok(Self::GrayWorld),
            "lab" | "lightness" => Ok(Self::Lab),
            _ => Err(format!(
                "Unknown white balance method '{}'. Valid: gray-world, lab",
                s
            )),
        }
    }
}

/// Gamma used by the AUTO path.
///
/// Serialized as a bare number or the string `adaptive`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GammaRepr", into = "GammaRepr")]
pub enum GammaSetting {
    Fixed(f32),
    /// Derived from mean luminance, see [`crate::auto_adjust::adaptive_gamma`]
    Adaptive,
}

impl Default for GammaSetting {
    fn default() -> Self {
        Self::Fixed(super::defaults::DEFAULT_GAMMA)
    }
}

impl fmt::Display for GammaSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(gamma) => write!(f, "{}", gamma),
            Self::Adaptive => write!(f, "adaptive"),
        }
    }
}

impl FromStr for GammaSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("adaptive") || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Adaptive);
        }
        trimmed
            .parse::<f32>()
            .map(Self::Fixed)
            .map_err(|_| format!("Invalid gamma '{}'. Use a number or 'adaptive'", s))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GammaRepr {
    Value(f32),
    Keyword(String),
}

impl TryFrom<GammaRepr> for GammaSetting {
    type Error = String;

    fn try_from(repr: GammaRepr) -> Result<Self, Self::Error> {
        match repr {
            GammaRepr::Value(gamma) => Ok(Self::Fixed(gamma)),
            GammaRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl From<GammaSetting> for GammaRepr {
    fn from(setting: GammaSetting) -> Self {
        match setting {
            GammaSetting::Fixed(gamma) => Self::Value(gamma),
            GammaSetting::Adaptive => Self::Keyword("adaptive".to_string()),
        }
    }
}
