//! mono-silhouette: monochrome silhouettes for small application icons
//!
//! This library decides whether a small raster icon is a full-color app icon
//! or an already-tinted silhouette, and turns colored icons into a white
//! silhouette whose alpha channel alone carries the shape. The result renders
//! acceptably on low-color surfaces such as a status indicator tinted by the
//! host.
//!
//! # Quick Start
//!
//! The [`DecisionEngine`] is the primary entry point:
//!
//! ```
//! use mono_silhouette::{Argb, DecisionEngine, IconSource, RasterImage, Thresholds};
//!
//! // Opaque blue square with a white block in the middle
//! let icon = RasterImage::from_fn(32, 32, |x, y| {
//!     if (8..24).contains(&x) && (8..24).contains(&y) {
//!         Argb::new(255, 255, 255, 255)
//!     } else {
//!         Argb::new(255, 0, 0, 255)
//!     }
//! });
//!
//! let engine = DecisionEngine::new(Thresholds::default());
//! let result = engine.synthesize(&IconSource::Flat(icon));
//!
//! assert!(result.image.is_monochrome());
//! assert_eq!(result.image.pixel(0, 0).alpha(), 0);
//! assert_eq!(result.image.pixel(16, 16).alpha(), 255);
//! ```
//!
//! # Building Blocks
//!
//! The engine is assembled from two groups of plain functions that can also
//! be used directly:
//!
//! - [`sample`]: cheap grid samplers ([`detect_color_saturation`],
//!   [`detect_transparency`], [`estimate_background_color`])
//! - [`silhouette`]: whole-image transforms producing a monochrome result
//!   ([`alpha_mask_from_transparency`], [`background_subtraction_silhouette`],
//!   [`luminance_to_alpha_fallback`]) and the [`is_bad_silhouette`] quality gate
//!
//! # Monochrome Results
//!
//! Every transform in [`silhouette`] returns a [`MonochromeResult`]: a
//! [`RasterImage`] whose RGB channels are pure white (`0xFFFFFF`) on every
//! pixel. Only alpha varies. Hosts tint the result themselves.
//!
//! # Decision Tree
//!
//! ```text
//! IconSource
//!   |
//!   +-- Layered, monochrome layer present ---------> alpha mask of that layer
//!   |
//!   +-- Layered, foreground present
//!   |     transparent? --yes--> alpha mask
//!   |        | no
//!   |     background subtraction --bad--> luminance fallback
//!   |
//!   +-- Flat (or layered without foreground, flattened)
//!         transparent? --yes--> alpha mask --bad--> force opaque
//!            | no                                     |
//!            |                 background subtraction --bad--> luminance --bad--> alpha mask
//!            v
//!         background subtraction --bad--> luminance fallback
//! ```
//!
//! # Thresholds
//!
//! All cut-offs (0.2 saturation, 0.3 colored fraction, alpha 200 and 10% edge
//! transparency, 15-unit background distance, 0.7 gamma, 0.80/0.90 quality
//! fractions, luminance midpoint 128) are empirical tuning constants. They
//! live in [`Thresholds`] so callers can recalibrate them; the defaults keep
//! the established behavior.
//!
//! # Empty Images
//!
//! A zero-width or zero-height image never panics or divides by zero:
//! samplers return `false` (or black for the background estimate), transforms
//! return an empty image, and the quality gate flags it as bad.

pub mod decision;
pub mod raster;
pub mod sample;
pub mod silhouette;
pub mod thresholds;


pub use decision::{DecisionEngine, Synthesis, SynthesisPath};
pub use raster::{Argb, IconSource, LayeredIcon, MonochromeResult, RasterError, RasterImage};
pub use sample::{detect_color_saturation, detect_transparency, estimate_background_color};
pub use silhouette::{
    alpha_mask_from_transparency, background_subtraction_silhouette, is_bad_silhouette,
    luminance_to_alpha_fallback, measure_quality, QualityReport,
};
pub use thresholds::Thresholds;
