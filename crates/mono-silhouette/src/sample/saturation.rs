use crate::raster::RasterImage;
use crate::thresholds::Thresholds;

use super::grid_step;

/// Decide whether an icon is a full-color app icon rather than a tinted
/// silhouette.
///
/// Walks a coarse grid (step `min(w, h) / 12`) and, for every sampled pixel
/// that is not nearly transparent, computes `(max - min) / max` over its RGB
/// channels. Returns true when more than 30% of the checked pixels have a
/// saturation above 0.2. Returns false for empty or fully transparent icons.
///
/// ```
/// use mono_silhouette::{detect_color_saturation, Argb, RasterImage, Thresholds};
///
/// let red = RasterImage::filled(24, 24, Argb::new(255, 255, 0, 0));
/// let grey = RasterImage::filled(24, 24, Argb::new(255, 128, 128, 128));
/// assert!(detect_color_saturation(&red, &Thresholds::default()));
/// assert!(!detect_color_saturation(&grey, &Thresholds::default()));
/// ```
pub fn detect_color_saturation(image: &RasterImage, thresholds: &Thresholds) -> bool {
    if image.is_empty() {
        return false;
    }

    let step = grid_step(
        image.width(),
        image.height(),
        thresholds.saturation_grid_divisor,
    );
    let mut colored = 0usize;
    let mut checked = 0usize;

    for y in (0..image.height()).step_by(step) {
        for x in (0..image.width()).step_by(step) {
            let pixel = image.pixel(x, y);
            if pixel.alpha() <= thresholds.saturation_min_alpha {
                continue;
            }
            checked += 1;
            if pixel.saturation() > thresholds.colored_saturation {
                colored += 1;
            }
        }
    }

    checked > 0 && colored as f32 / checked as f32 > thresholds.colored_fraction
}
