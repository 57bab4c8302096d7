//! Whole-image transforms into monochrome silhouettes.
//!
//! Every transform returns a [`MonochromeResult`](crate::MonochromeResult):
//! a new raster whose RGB is pure white everywhere, so only alpha carries
//! the shape.
//!
//! - [`alpha_mask_from_transparency`]: keep the source alpha as-is
//! - [`background_subtraction_silhouette`]: alpha from distance to the
//!   estimated background fill
//! - [`luminance_to_alpha_fallback`]: alpha from brightness, the catch-all
//!
//! [`is_bad_silhouette`] is the quality gate every candidate must pass.

mod alpha_mask;
mod luminance;
mod quality;
mod subtraction;

pub use alpha_mask::alpha_mask_from_transparency;
pub use luminance::luminance_to_alpha_fallback;
pub use quality::{is_bad_silhouette, measure_quality, QualityReport};
pub use subtraction::background_subtraction_silhouette;
