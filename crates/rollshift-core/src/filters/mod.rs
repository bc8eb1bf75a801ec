//! Optional post-filters run after gamma on the AUTO path
//!
//! - [`sharpen`]: 3x3 center-weighted high-pass, edge-replicated borders
//! - [`denoise`]: edge-preserving bilateral smoothing

mod denoise;
mod sharpen;

#[cfg(test)]
mod tests;

pub use denoise::{denoise, DENOISE_RADIUS, DENOISE_SPATIAL_SIGMA};
pub use sharpen::{sharpen, SHARPEN_KERNEL};
