//! Film base parsing.

use rollshift_core::BaseColor;

/// Parse base RGB values in format "R,G,B"
///
/// Values may be given on the 0-255 scale (`215,150,95`) or normalized to
/// 0.0-1.0 (`0.84,0.59,0.37`). When every value is at most 1.0 the input is
/// treated as normalized.
pub fn parse_base_rgb(base_str: &str) -> Result<BaseColor, String> {
    let parts: Vec<&str> = base_str.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Base must be in format R,G,B (e.g., 215,150,95), got: {}",
            base_str
        ));
    }

    let mut rgb = [0.0f32; 3];
    for ((slot, part), name) in rgb.iter_mut().zip(&parts).zip(["red", "green", "blue"]) {
        *slot = part
            .trim()
            .parse::<f32>()
            .map_err(|_| format!("Invalid {} value: {}", name, part.trim()))?;
    }

    for (val, name) in rgb.iter().zip(["Red", "Green", "Blue"]) {
        if !val.is_finite() || *val <= 0.0 || *val > 255.0 {
            return Err(format!("{} value {} must be in range (0, 255]", name, val));
        }
    }

    let base = if rgb.iter().all(|&v| v <= 1.0) {
        BaseColor::from_normalized(rgb)
    } else {
        BaseColor::new(rgb)
    };
    base.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_rgb_8bit() {
        let base = parse_base_rgb("215, 150,95").unwrap();
        assert_eq!(base.rgb(), [215.0, 150.0, 95.0]);
    }

    #[test]
    fn test_parse_base_rgb_normalized() {
        let base = parse_base_rgb("1.0,0.5,0.2").unwrap();
        assert!((base.red() - 255.0).abs() < 1e-4);
        assert!((base.green() - 127.5).abs() < 1e-4);
        assert!((base.blue() - 51.0).abs() < 1e-4);
    }

    #[test]
    fn test_parse_base_rgb_rejects_bad_input() {
        assert!(parse_base_rgb("200,150").is_err());
        assert!(parse_base_rgb("200,abc,90").is_err());
        assert!(parse_base_rgb("200,0,90").is_err());
        assert!(parse_base_rgb("300,150,90").is_err());
        assert!(parse_base_rgb("-1,150,90").is_err());
    }
}
