//! White balance
//!
//! Two interchangeable strategies remove the residual cast left after
//! inversion:
//! - `gray_world`: scale each channel so its mean meets the grand mean
//! - `lab`: shift the Lab chroma planes so their means sit at neutral

mod gray_world;
mod lab;

#[cfg(test)]
mod tests;

use crate::models::WhiteBalanceMethod;
use crate::raster::RgbImage;

pub use gray_world::{gray_world_multipliers, gray_world_white_balance};
pub use lab::lab_white_balance;

/// Run the configured white balance strategy.
pub fn apply_white_balance(image: &RgbImage, method: WhiteBalanceMethod) -> RgbImage {
    match method {
        WhiteBalanceMethod::GrayWorld => gray_world_white_balance(image),
        WhiteBalanceMethod::Lab => lab_white_balance(image),
    }
}
