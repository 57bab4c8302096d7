use crate::raster::{Argb, MonochromeResult, RasterImage};
use crate::sample::estimate_background_color;
use crate::thresholds::Thresholds;

use super::luminance::luminance_to_alpha_fallback;

/// Recover the subject of an opaque icon painted on a roughly uniform fill.
///
/// The background color is estimated from the border, then each pixel's
/// alpha is its Euclidean RGB distance to that color, normalized by the
/// largest distance in the image and shaped by `normalized^0.7` so faint
/// edges stay visible. When the largest distance is under 15 the image is
/// too flat to separate and the luminance fallback is returned instead.
pub fn background_subtraction_silhouette(
    image: &RasterImage,
    thresholds: &Thresholds,
) -> MonochromeResult {
    if image.is_empty() {
        return image.clone();
    }

    let background = estimate_background_color(image, thresholds);
    let distances: Vec<f64> = image
        .pixels()
        .iter()
        .map(|&p| rgb_distance(p, background))
        .collect();
    let max_dist = distances.iter().copied().fold(0.0, f64::max);

    if max_dist < thresholds.min_background_distance {
        return luminance_to_alpha_fallback(image, thresholds);
    }

    let pixels = distances
        .iter()
        .map(|&d| {
            let normalized = (d / max_dist).clamp(0.0, 1.0);
            let alpha = (normalized.powf(thresholds.silhouette_gamma) * 255.0) as i64;
            Argb::white(alpha.clamp(0, 255) as u8)
        })
        .collect();
    image.with_pixels(pixels)
}

fn rgb_distance(p: Argb, (r, g, b): (u8, u8, u8)) -> f64 {
    let dr = p.red() as f64 - r as f64;
    let dg = p.green() as f64 - g as f64;
    let db = p.blue() as f64 - b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}
