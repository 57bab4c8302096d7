use crate::raster::RasterImage;
use crate::thresholds::Thresholds;

use super::grid_step;

/// Decide whether an icon carries meaningful transparency at its edges.
///
/// Any corner with alpha below 200 short-circuits to true. Otherwise all four
/// border lines are sampled at step `min(w, h) / 16` and the icon counts as
/// transparent when more than 10% of the border samples are below 200.
/// Empty images are never transparent.
pub fn detect_transparency(image: &RasterImage, thresholds: &Thresholds) -> bool {
    if image.is_empty() {
        return false;
    }

    let (w, h) = (image.width(), image.height());
    let cut = thresholds.transparent_alpha;
    let is_clear = |x: u32, y: u32| image.pixel(x, y).alpha() < cut;

    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
    if corners.iter().any(|&(x, y)| is_clear(x, y)) {
        return true;
    }

    let step = grid_step(w, h, thresholds.transparency_grid_divisor);
    let mut clear = 0usize;
    let mut total = 0usize;

    for x in (0..w).step_by(step) {
        for y in [0, h - 1] {
            total += 1;
            if is_clear(x, y) {
                clear += 1;
            }
        }
    }
    for y in (0..h).step_by(step) {
        for x in [0, w - 1] {
            total += 1;
            if is_clear(x, y) {
                clear += 1;
            }
        }
    }

    total > 0 && clear as f32 / total as f32 > thresholds.transparent_edge_fraction
}
