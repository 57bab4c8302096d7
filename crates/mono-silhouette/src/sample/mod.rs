//! Cheap grid samplers.
//!
//! Each sampler looks at a sparse subset of pixels so classification stays
//! cheap even when it runs for every posted notification:
//!
//! - [`detect_color_saturation`]: is this a full-color app icon?
//! - [`detect_transparency`]: does the icon carry usable alpha at its edges?
//! - [`estimate_background_color`]: median border color of an opaque icon

mod background;
mod saturation;
mod transparency;

pub use background::estimate_background_color;
pub use saturation::detect_color_saturation;
pub use transparency::detect_transparency;

/// Sampling step `max(1, min(width, height) / divisor)`.
#[inline]
pub(crate) fn grid_step(width: u32, height: u32, divisor: u32) -> usize {
    (width.min(height) / divisor.max(1)).max(1) as usize
}
