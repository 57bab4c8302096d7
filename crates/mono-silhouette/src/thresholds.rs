//! Tuning constants for classification and synthesis.
//!
//! None of these values are derived invariants. They were chosen by looking
//! at real notification icons and are kept configurable so they can be
//! recalibrated without touching the algorithms.

/// Heuristic cut-offs used by the samplers, the transforms and the quality
/// gate.
///
/// Alpha thresholds are on the 0..=255 scale; fractions are in 0.0..=1.0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Saturation grid step is `min(w, h) / saturation_grid_divisor`.
    pub saturation_grid_divisor: u32,
    /// Pixels at or below this alpha are ignored by the saturation check.
    pub saturation_min_alpha: u8,
    /// A pixel with saturation above this counts as colored.
    pub colored_saturation: f32,
    /// An icon is colored when more than this fraction of checked pixels is.
    pub colored_fraction: f32,

    /// Border sampling step is `min(w, h) / transparency_grid_divisor`.
    pub transparency_grid_divisor: u32,
    /// Border pixels below this alpha count as transparent.
    pub transparent_alpha: u8,
    /// An icon has usable alpha when more than this fraction of its border does.
    pub transparent_edge_fraction: f32,

    /// Approximate number of samples taken per edge for the background estimate.
    pub background_samples_per_edge: u32,
    /// Below this maximum RGB distance the image is too flat to separate.
    pub min_background_distance: f64,
    /// Exponent applied to the normalized background distance.
    pub silhouette_gamma: f64,

    /// Average luminance above which the luminance fallback inverts.
    pub luminance_midpoint: u8,

    /// Quality grid step is `min(w, h) / quality_grid_divisor`.
    pub quality_grid_divisor: u32,
    /// Samples above this alpha count as opaque.
    pub quality_opaque_alpha: u8,
    /// Samples below this alpha count as transparent.
    pub quality_transparent_alpha: u8,
    /// A silhouette is bad when more than this fraction is opaque.
    pub max_opaque_fraction: f32,
    /// A silhouette is bad when more than this fraction is transparent.
    pub max_transparent_fraction: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            saturation_grid_divisor: 12,
            saturation_min_alpha: 50,
            colored_saturation: 0.2,
            colored_fraction: 0.3,
            transparency_grid_divisor: 16,
            transparent_alpha: 200,
            transparent_edge_fraction: 0.10,
            background_samples_per_edge: 10,
            min_background_distance: 15.0,
            silhouette_gamma: 0.7,
            luminance_midpoint: 128,
            quality_grid_divisor: 8,
            quality_opaque_alpha: 200,
            quality_transparent_alpha: 30,
            max_opaque_fraction: 0.80,
            max_transparent_fraction: 0.90,
        }
    }
}
