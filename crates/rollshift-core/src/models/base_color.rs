//! Film base reference color.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Per-channel film base intensities (R, G, B) on the 0-255 scale.
///
/// Every channel is finite and strictly positive; the inverter divides by
/// these values, so a zero channel can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BaseColorRepr", into = "BaseColorRepr")]
pub struct BaseColor {
    rgb: [f32; 3],
}

impl BaseColor {
    pub fn new(rgb: [f32; 3]) -> Result<Self, DomainError> {
        for (channel, &value) in rgb.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::DegenerateBase { channel, value });
            }
        }
        Ok(Self { rgb })
    }

    /// Base color given as normalized 0.0-1.0 values.
    pub fn from_normalized(rgb: [f32; 3]) -> Result<Self, DomainError> {
        Self::new([rgb[0] * 255.0, rgb[1] * 255.0, rgb[2] * 255.0])
    }

    pub fn rgb(&self) -> [f32; 3] {
        self.rgb
    }

    pub fn red(&self) -> f32 {
        self.rgb[0]
    }

    pub fn green(&self) -> f32 {
        self.rgb[1]
    }

    pub fn blue(&self) -> f32 {
        self.rgb[2]
    }
}

#[derive(Serialize, Deserialize)]
struct BaseColorRepr {
    rgb: [f32; 3],
}

impl TryFrom<BaseColorRepr> for BaseColor {
    type Error = DomainError;

    fn try_from(repr: BaseColorRepr) -> Result<Self, Self::Error> {
        BaseColor::new(repr.rgb)
    }
}

impl From<BaseColor> for BaseColorRepr {
    fn from(base: BaseColor) -> Self {
        Self { rgb: base.rgb }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_channel() {
        let err = BaseColor::new([200.0, 0.0, 120.0]).unwrap_err();
        assert_eq!(
            err,
            DomainError::DegenerateBase {
                channel: 1,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_non_finite_channel() {
        assert!(BaseColor::new([f32::INFINITY, 10.0, 10.0]).is_err());
        assert!(BaseColor::new([10.0, 10.0, f32::NAN]).is_err());
        assert!(BaseColor::new([10.0, -1.0, 10.0]).is_err());
    }

    #[test]
    fn test_from_normalized_scales_to_8bit() {
        let base = BaseColor::from_normalized([1.0, 0.5, 0.2]).unwrap();
        assert!((base.red() - 255.0).abs() < 1e-4);
        assert!((base.green() - 127.5).abs() < 1e-4);
        assert!((base.blue() - 51.0).abs() < 1e-4);
    }

    #[test]
    fn test_json_rejects_degenerate_base() {
        let ok: BaseColor = serde_json::from_str(r#"{"rgb":[210.0,160.0,110.0]}"#).unwrap();
        assert_eq!(ok.rgb(), [210.0, 160.0, 110.0]);

        let bad = serde_json::from_str::<BaseColor>(r#"{"rgb":[210.0,0.0,110.0]}"#);
        assert!(bad.is_err());
    }
}
