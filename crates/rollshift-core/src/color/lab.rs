//! LAB (CIE L*a*b*) color space conversions and utilities

/// LAB color representation (CIE L*a*b*)
/// - L: 0.0-100.0 (lightness)
/// - a: approximately -128 to +128 (green-red axis)
/// - b: approximately -128 to +128 (blue-yellow axis)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// D65 standard illuminant reference white point
pub(crate) const D65_X: f32 = 0.95047;
pub(crate) const D65_Y: f32 = 1.00000;
pub(crate) const D65_Z: f32 = 1.08883;

/// sRGB to XYZ matrix (D65)
pub(crate) const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.119_192, 0.9503041],
];

/// XYZ to sRGB matrix (D65)
pub(crate) const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.969_266, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// sRGB transfer function: encoded 0.0-1.0 to linear light
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB transfer function: linear light to encoded 0.0-1.0
#[inline]
pub fn linear_to_srgb(v: f32) -> f32 {
    let v = v.max(0.0);
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// LAB f(t) function
#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    const DELTA_CUBED: f32 = DELTA * DELTA * DELTA; // ~0.008856

    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// LAB f^-1(t) inverse function
#[inline]
fn lab_f_inv(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;

    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

#[inline]
fn mat3_mul(m: &[[f32; 3]; 3], v: (f32, f32, f32)) -> (f32, f32, f32) {
    (
        m[0][0] * v.0 + m[0][1] * v.1 + m[0][2] * v.2,
        m[1][0] * v.0 + m[1][1] * v.1 + m[1][2] * v.2,
        m[2][0] * v.0 + m[2][1] * v.1 + m[2][2] * v.2,
    )
}

/// Convert linear RGB to CIE LAB (D65 illuminant)
///
/// Input: Linear RGB values in range 0.0-1.0
/// Output: LAB where L is 0-100, a and b are approximately -128 to +128
#[inline]
pub fn rgb_to_lab(r: f32, g: f32, b: f32) -> Lab {
    let (x, y, z) = mat3_mul(&SRGB_TO_XYZ, (r.max(0.0), g.max(0.0), b.max(0.0)));

    let fx = lab_f(x / D65_X);
    let fy = lab_f(y / D65_Y);
    let fz = lab_f(z / D65_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIE LAB to linear RGB (D65 illuminant)
///
/// Output: Linear RGB values (may be outside 0.0-1.0 for out-of-gamut colors)
#[inline]
pub fn lab_to_rgb(lab: Lab) -> (f32, f32, f32) {
    let Lab { l, a, b } = lab;

    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let x = D65_X * lab_f_inv(fx);
    let y = D65_Y * lab_f_inv(fy);
    let z = D65_Z * lab_f_inv(fz);

    mat3_mul(&XYZ_TO_SRGB, (x, y, z))
}

/// Encoded 8-bit-scale RGB (0-255) to LAB.
#[inline]
pub fn srgb8_to_lab(rgb: [f32; 3]) -> Lab {
    rgb_to_lab(
        srgb_to_linear(rgb[0] / 255.0),
        srgb_to_linear(rgb[1] / 255.0),
        srgb_to_linear(rgb[2] / 255.0),
    )
}

/// LAB to encoded 8-bit-scale RGB, clamped to 0-255.
#[inline]
pub fn lab_to_srgb8(lab: Lab) -> [f32; 3] {
    let (r, g, b) = lab_to_rgb(lab);
    [
        (linear_to_srgb(r) * 255.0).clamp(0.0, 255.0),
        (linear_to_srgb(g) * 255.0).clamp(0.0, 255.0),
        (linear_to_srgb(b) * 255.0).clamp(0.0, 255.0),
    ]
}
