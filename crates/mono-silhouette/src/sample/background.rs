use crate::raster::{Argb, RasterImage};
use crate::thresholds::Thresholds;

/// Estimate the fill color behind an opaque icon's subject.
///
/// Samples about ten points along each edge and takes the per-channel median
/// rather than the mean, so foreground that bleeds into the border does not
/// drag the estimate. Returns black for an empty image.
pub fn estimate_background_color(image: &RasterImage, thresholds: &Thresholds) -> (u8, u8, u8) {
    if image.is_empty() {
        return (0, 0, 0);
    }

    let (w, h) = (image.width(), image.height());
    let samples = thresholds.background_samples_per_edge.max(1);
    let step_x = (w / samples).max(1) as usize;
    let step_y = (h / samples).max(1) as usize;

    let mut edge: Vec<Argb> = Vec::new();
    for x in (0..w).step_by(step_x) {
        edge.push(image.pixel(x, 0));
        edge.push(image.pixel(x, h - 1));
    }
    for y in (0..h).step_by(step_y) {
        edge.push(image.pixel(0, y));
        edge.push(image.pixel(w - 1, y));
    }

    (
        median(edge.iter().map(|p| p.red())),
        median(edge.iter().map(|p| p.green())),
        median(edge.iter().map(|p| p.blue())),
    )
}

/// Upper median of a non-empty channel sample.
fn median(values: impl Iterator<Item = u8>) -> u8 {
    let mut sorted: Vec<u8> = values.collect();
    sorted.sort_unstable();
    sorted.get(sorted.len() / 2).copied().unwrap_or(0)
}
