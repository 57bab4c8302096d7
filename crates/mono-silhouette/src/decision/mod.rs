//! Monochrome decision tree.
//!
//! [`DecisionEngine`] picks the synthesis strategy for an [`IconSource`]
//! and validates every candidate with the quality gate, falling back to the
//! next weaker strategy until one is accepted. The terminal fallbacks are
//! accepted even when degenerate, so synthesis never fails.

use crate::raster::{IconSource, LayeredIcon, MonochromeResult, RasterImage};
use crate::silhouette::{
    alpha_mask_from_transparency, background_subtraction_silhouette, is_bad_silhouette,
    luminance_to_alpha_fallback,
};
use crate::sample::detect_transparency;
use crate::thresholds::Thresholds;

/// Which branch of the decision tree produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisPath {
    /// Dedicated monochrome layer of a layered icon.
    MonochromeLayer,
    /// Layered icon, transparent foreground used as an alpha mask.
    ForegroundAlphaMask,
    /// Layered icon, background subtraction on the opaque foreground.
    ForegroundSilhouette,
    /// Layered icon, luminance fallback on the foreground.
    ForegroundLuminance,
    /// Transparent icon, alpha mask accepted.
    AlphaMask,
    /// Transparent icon forced opaque, then background subtraction.
    OpaquedSilhouette,
    /// Transparent icon forced opaque, then luminance fallback.
    OpaquedLuminance,
    /// Every retry failed the gate; the rejected alpha mask is returned.
    AlphaMaskFallback,
    /// Opaque icon, background subtraction.
    Silhouette,
    /// Opaque icon, luminance fallback.
    Luminance,
}

impl SynthesisPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisPath::MonochromeLayer => "monochrome-layer",
            SynthesisPath::ForegroundAlphaMask => "foreground-alpha-mask",
            SynthesisPath::ForegroundSilhouette => "foreground-silhouette",
            SynthesisPath::ForegroundLuminance => "foreground-luminance",
            SynthesisPath::AlphaMask => "alpha-mask",
            SynthesisPath::OpaquedSilhouette => "opaqued-silhouette",
            SynthesisPath::OpaquedLuminance => "opaqued-luminance",
            SynthesisPath::AlphaMaskFallback => "alpha-mask-fallback",
            SynthesisPath::Silhouette => "silhouette",
            SynthesisPath::Luminance => "luminance",
        }
    }
}

impl std::fmt::Display for SynthesisPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated monochrome result and the branch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub image: MonochromeResult,
    pub path: SynthesisPath,
}

impl Synthesis {
    fn new(image: MonochromeResult, path: SynthesisPath) -> Self {
        Self { image, path }
    }
}

/// Turns any icon into a validated white silhouette.
///
/// The engine is stateless apart from its thresholds; `synthesize()` takes
/// `&self` so one engine can be shared across threads.
///
/// # Example
///
/// ```
/// use mono_silhouette::{Argb, DecisionEngine, IconSource, RasterImage, SynthesisPath};
///
/// // Transparent icon with a solid dot in the middle
/// let icon = RasterImage::from_fn(16, 16, |x, y| {
///     if (4..12).contains(&x) && (4..12).contains(&y) {
///         Argb::new(255, 200, 30, 30)
///     } else {
///         Argb::TRANSPARENT
///     }
/// });
///
/// let result = DecisionEngine::default().synthesize(&IconSource::Flat(icon));
/// assert_eq!(result.path, SynthesisPath::AlphaMask);
/// assert!(result.image.is_monochrome());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    thresholds: Thresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Run the full decision tree.
    pub fn synthesize(&self, source: &IconSource) -> Synthesis {
        match source {
            IconSource::Layered(layers) => match self.synthesize_layered(layers) {
                Some(result) => result,
                None => self.synthesize_flat(&layers.flatten()),
            },
            IconSource::Flat(image) => self.synthesize_flat(image),
        }
    }

    /// Layered icons: monochrome layer first, then the foreground alone.
    /// Returns `None` when neither layer exists.
    fn synthesize_layered(&self, layers: &LayeredIcon) -> Option<Synthesis> {
        let t = &self.thresholds;

        if let Some(mono) = &layers.monochrome {
            return Some(Synthesis::new(
                alpha_mask_from_transparency(mono),
                SynthesisPath::MonochromeLayer,
            ));
        }

        let fg = layers.foreground.as_ref()?;
        if detect_transparency(fg, t) {
            return Some(Synthesis::new(
                alpha_mask_from_transparency(fg),
                SynthesisPath::ForegroundAlphaMask,
            ));
        }

        let silhouette = background_subtraction_silhouette(fg, t);
        if !is_bad_silhouette(&silhouette, t) {
            return Some(Synthesis::new(
                silhouette,
                SynthesisPath::ForegroundSilhouette,
            ));
        }
        Some(Synthesis::new(
            luminance_to_alpha_fallback(fg, t),
            SynthesisPath::ForegroundLuminance,
        ))
    }

    fn synthesize_flat(&self, image: &RasterImage) -> Synthesis {
        let t = &self.thresholds;

        if detect_transparency(image, t) {
            let mask = alpha_mask_from_transparency(image);
            if !is_bad_silhouette(&mask, t) {
                return Synthesis::new(mask, SynthesisPath::AlphaMask);
            }

            // Nearly solid or nearly blank despite having alpha: drop alpha and
            // separate the subject by contrast instead.
            let opaque = force_opaque(image);
            let silhouette = background_subtraction_silhouette(&opaque, t);
            if !is_bad_silhouette(&silhouette, t) {
                return Synthesis::new(silhouette, SynthesisPath::OpaquedSilhouette);
            }
            let luminance = luminance_to_alpha_fallback(&opaque, t);
            if !is_bad_silhouette(&luminance, t) {
                return Synthesis::new(luminance, SynthesisPath::OpaquedLuminance);
            }
            return Synthesis::new(mask, SynthesisPath::AlphaMaskFallback);
        }

        let silhouette = background_subtraction_silhouette(image, t);
        if is_bad_silhouette(&silhouette, t) {
            return Synthesis::new(
                luminance_to_alpha_fallback(image, t),
                SynthesisPath::Luminance,
            );
        }
        Synthesis::new(silhouette, SynthesisPath::Silhouette)
    }
}

/// Same pixels with alpha set to 255; RGB is preserved.
fn force_opaque(image: &RasterImage) -> RasterImage {
    image.map_pixels(|p| p.with_alpha(255))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Argb;

    fn engine() -> DecisionEngine {
        DecisionEngine::default()
    }

    fn disk(size: u32, radius: f32, inside: Argb, outside: Argb) -> RasterImage {
        let c = size as f32 / 2.0;
        RasterImage::from_fn(size, size, |x, y| {
            let dx = x as f32 + 0.5 - c;
            let dy = y as f32 + 0.5 - c;
            if dx * dx + dy * dy <= radius * radius {
                inside
            } else {
                outside
            }
        })
    }

    #[test]
    fn test_monochrome_layer_wins() {
        let mono = disk(24, 8.0, Argb::new(255, 0, 0, 0), Argb::TRANSPARENT);
        let layers = LayeredIcon {
            foreground: Some(RasterImage::filled(24, 24, Argb::new(255, 255, 0, 0))),
            background: None,
            monochrome: Some(mono.clone()),
        };
        let result = engine().synthesize(&IconSource::Layered(layers));
        assert_eq!(result.path, SynthesisPath::MonochromeLayer);
        assert_eq!(result.image, alpha_mask_from_transparency(&mono));
    }

    #[test]
    fn test_transparent_foreground_layer() {
        let fg = disk(24, 6.0, Argb::new(255, 0, 180, 0), Argb::TRANSPARENT);
        let layers = LayeredIcon {
            foreground: Some(fg),
            background: Some(RasterImage::filled(24, 24, Argb::new(255, 255, 255, 255))),
            monochrome: None,
        };
        let result = engine().synthesize(&IconSource::Layered(layers));
        assert_eq!(result.path, SynthesisPath::ForegroundAlphaMask);
    }

    #[test]
    fn test_opaque_foreground_layer_uses_subtraction() {
        let fg = disk(
            32,
            9.0,
            Argb::new(255, 255, 255, 255),
            Argb::new(255, 0, 90, 200),
        );
        let layers = LayeredIcon {
            foreground: Some(fg),
            ..Default::default()
        };
        let result = engine().synthesize(&IconSource::Layered(layers));
        assert_eq!(result.path, SynthesisPath::ForegroundSilhouette);
        assert!(result.image.is_monochrome());
    }

    #[test]
    fn test_solid_foreground_layer_falls_back_to_luminance() {
        let fg = RasterImage::filled(16, 16, Argb::new(255, 30, 200, 30));
        let layers = LayeredIcon {
            foreground: Some(fg.clone()),
            ..Default::default()
        };
        let result = engine().synthesize(&IconSource::Layered(layers));
        assert_eq!(result.path, SynthesisPath::ForegroundLuminance);
        assert_eq!(
            result.image,
            luminance_to_alpha_fallback(&fg, &Thresholds::default())
        );
    }

    #[test]
    fn test_layered_without_foreground_is_flattened() {
        let bg = disk(
            32,
            9.0,
            Argb::new(255, 255, 255, 255),
            Argb::new(255, 0, 0, 255),
        );
        let layers = LayeredIcon {
            background: Some(bg),
            ..Default::default()
        };
        let result = engine().synthesize(&IconSource::Layered(layers));
        assert_eq!(result.path, SynthesisPath::Silhouette);
    }

    #[test]
    fn test_nearly_solid_transparent_icon_is_opaqued() {
        // Rounded-corner plate: transparent corners, but > 80% opaque, with a
        // white glyph painted on a red plate.
        let img = RasterImage::from_fn(32, 32, |x, y| {
            let corner = (x < 2 || x > 29) && (y < 2 || y > 29);
            if corner {
                Argb::TRANSPARENT
            } else if (12..20).contains(&x) && (8..24).contains(&y) {
                Argb::new(255, 255, 255, 255)
            } else {
                Argb::new(255, 220, 20, 20)
            }
        });
        let result = engine().synthesize(&IconSource::Flat(img));
        assert_eq!(result.path, SynthesisPath::OpaquedSilhouette);
        assert_eq!(result.image.pixel(16, 16).alpha(), 255);
        assert_eq!(result.image.pixel(5, 5).alpha(), 0);
    }

    #[test]
    fn test_force_opaque_preserves_rgb() {
        let img = RasterImage::filled(2, 2, Argb::new(0, 1, 2, 3));
        assert_eq!(force_opaque(&img).pixel(0, 0), Argb::new(255, 1, 2, 3));
    }

    #[test]
    fn test_solid_opaque_block_uses_luminance() {
        let img = RasterImage::filled(16, 16, Argb::new(255, 250, 250, 250));
        let result = engine().synthesize(&IconSource::Flat(img));
        assert_eq!(result.path, SynthesisPath::Luminance);
    }

    #[test]
    fn test_empty_source_does_not_panic() {
        let result = engine().synthesize(&IconSource::Flat(RasterImage::default()));
        assert!(result.image.is_empty());
        let result = engine().synthesize(&IconSource::Layered(LayeredIcon::default()));
        assert!(result.image.is_empty());
    }
}
