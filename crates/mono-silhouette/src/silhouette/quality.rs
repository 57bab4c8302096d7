use crate::raster::RasterImage;
use crate::sample::grid_step;
use crate::thresholds::Thresholds;

/// Opaque/transparent balance of a candidate silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Number of grid samples taken.
    pub samples: usize,
    /// Fraction of samples with alpha above the opaque cut-off.
    pub opaque_fraction: f32,
    /// Fraction of samples with alpha below the transparent cut-off.
    pub transparent_fraction: f32,
}

/// Sample alpha on a grid with step `min(w, h) / 8` and classify each sample
/// as opaque (> 200), transparent (< 30) or neither.
pub fn measure_quality(image: &RasterImage, thresholds: &Thresholds) -> QualityReport {
    if image.is_empty() {
        return QualityReport {
            samples: 0,
            opaque_fraction: 0.0,
            transparent_fraction: 0.0,
        };
    }

    let step = grid_step(image.width(), image.height(), thresholds.quality_grid_divisor);
    let mut opaque = 0usize;
    let mut transparent = 0usize;
    let mut total = 0usize;

    for y in (0..image.height()).step_by(step) {
        for x in (0..image.width()).step_by(step) {
            let alpha = image.pixel(x, y).alpha();
            total += 1;
            if alpha > thresholds.quality_opaque_alpha {
                opaque += 1;
            }
            if alpha < thresholds.quality_transparent_alpha {
                transparent += 1;
            }
        }
    }

    QualityReport {
        samples: total,
        opaque_fraction: opaque as f32 / total as f32,
        transparent_fraction: transparent as f32 / total as f32,
    }
}

/// Quality gate: true when a silhouette is unusable.
///
/// A silhouette is bad when more than 80% of its samples are opaque (the
/// icon is a solid block) or more than 90% are transparent (the icon
/// vanished). An empty image is always bad.
///
/// ```
/// use mono_silhouette::{is_bad_silhouette, Argb, RasterImage, Thresholds};
///
/// let solid = RasterImage::filled(16, 16, Argb::white(255));
/// let blank = RasterImage::filled(16, 16, Argb::white(0));
/// assert!(is_bad_silhouette(&solid, &Thresholds::default()));
/// assert!(is_bad_silhouette(&blank, &Thresholds::default()));
/// ```
pub fn is_bad_silhouette(image: &RasterImage, thresholds: &Thresholds) -> bool {
    let report = measure_quality(image, thresholds);
    report.samples == 0
        || report.opaque_fraction > thresholds.max_opaque_fraction
        || report.transparent_fraction > thresholds.max_transparent_fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Argb;

    fn t() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn test_empty_is_bad() {
        assert!(is_bad_silhouette(&RasterImage::default(), &t()));
        assert_eq!(measure_quality(&RasterImage::default(), &t()).samples, 0);
    }

    #[test]
    fn test_checkerboard_half_alpha_is_good() {
        let img = RasterImage::from_fn(32, 32, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Argb::white(255)
            } else {
                Argb::white(0)
            }
        });
        assert!(!is_bad_silhouette(&img, &t()));
    }

    #[test]
    fn test_uniform_half_alpha_is_good() {
        // 128 is neither opaque nor transparent
        let img = RasterImage::filled(32, 32, Argb::white(128));
        let report = measure_quality(&img, &t());
        assert_eq!(report.opaque_fraction, 0.0);
        assert_eq!(report.transparent_fraction, 0.0);
        assert!(!is_bad_silhouette(&img, &t()));
    }

    #[test]
    fn test_opaque_fraction_boundary() {
        // 10 samples in one row (step 1), 8 opaque = exactly 80% -> still good
        let img = RasterImage::from_fn(10, 1, |x, _| {
            if x < 8 {
                Argb::white(255)
            } else {
                Argb::white(128)
            }
        });
        assert!(!is_bad_silhouette(&img, &t()));

        let img = RasterImage::from_fn(10, 1, |x, _| {
            if x < 9 {
                Argb::white(255)
            } else {
                Argb::white(128)
            }
        });
        assert!(is_bad_silhouette(&img, &t()));
    }

    #[test]
    fn test_sample_count_follows_grid() {
        // 64x64, step 8 -> 8 x 8 samples
        let img = RasterImage::filled(64, 64, Argb::white(100));
        assert_eq!(measure_quality(&img, &t()).samples, 64);
    }
}
