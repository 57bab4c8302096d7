use crate::raster::{Argb, MonochromeResult, RasterImage};

/// White silhouette that keeps the source alpha unchanged.
///
/// Used whenever the source already carries meaningful transparency.
///
/// ```
/// use mono_silhouette::{alpha_mask_from_transparency, Argb, RasterImage};
///
/// let src = RasterImage::filled(2, 2, Argb::new(90, 255, 0, 0));
/// let mask = alpha_mask_from_transparency(&src);
/// assert_eq!(mask.pixel(1, 1), Argb::white(90));
/// ```
pub fn alpha_mask_from_transparency(image: &RasterImage) -> MonochromeResult {
    image.map_pixels(|p| Argb::white(p.alpha()))
}
