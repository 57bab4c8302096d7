use crate::raster::{Argb, MonochromeResult, RasterImage};
use crate::thresholds::Thresholds;

/// Alpha from brightness: the fallback when no structural separation works.
///
/// Computes the average luminance `0.299r + 0.587g + 0.114b` over the whole
/// image. When it is above the midpoint (128) the icon is assumed to sit on
/// a light background and per-pixel luminance is inverted so the dark
/// subject becomes visible. Alpha is `clamp(L * 2, 0, 255)`.
pub fn luminance_to_alpha_fallback(image: &RasterImage, thresholds: &Thresholds) -> MonochromeResult {
    if image.is_empty() {
        return image.clone();
    }

    let luma: Vec<u8> = image.pixels().iter().map(|p| p.luminance()).collect();
    let sum: u64 = luma.iter().map(|&l| l as u64).sum();
    let average = sum / luma.len() as u64;
    let invert = average > thresholds.luminance_midpoint as u64;

    let pixels = luma
        .iter()
        .map(|&l| {
            let l = if invert { 255 - l } else { l };
            Argb::white((l as u32 * 2).min(255) as u8)
        })
        .collect();
    image.with_pixels(pixels)
}
