//! Color space conversions
//!
//! RGB <-> CIE LAB, plus the planar 8-bit lightness/chroma form used by the
//! white balance and local contrast stages.

mod lab;
mod planes;


pub use lab::{
    lab_to_rgb, lab_to_srgb8, linear_to_srgb, rgb_to_lab, srgb8_to_lab, srgb_to_linear, Lab,
};
pub use planes::{LabPlanes, CHROMA_NEUTRAL};
