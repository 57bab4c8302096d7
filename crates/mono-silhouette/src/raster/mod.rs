//! Raster types shared by every stage.
//!
//! - [`Argb`]: one straight 32-bit pixel
//! - [`RasterImage`]: an owned row-major grid of pixels
//! - [`IconSource`]: a flat bitmap or a layered icon

mod argb;
mod error;
mod image;
mod source;

pub use argb::Argb;
pub use error::RasterError;
pub use image::{MonochromeResult, RasterImage};
pub use source::{IconSource, LayeredIcon};
