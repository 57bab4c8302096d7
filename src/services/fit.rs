use crate::models::CacheKey;
use crate::services::tiered_cache::BoundedCache;
use mono_silhouette::{Argb, RasterImage};
use std::sync::atomic::{AtomicU64, Ordering};
use tiny_skia::{ColorU8, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

/// Rescales silhouettes to the size a host asks for, memoizing the results.
#[derive(Default)]
pub struct FitEngine {
    rescales: AtomicU64,
}

impl FitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit `image` to `target_width` x `target_height`.
    ///
    /// Non-positive targets and same-size requests return the input. With a
    /// `cache_key`, resampled results are stored under
    /// `fit_<key>_<w>_<h>` in `cache` and served from there afterwards.
    pub fn fit(
        &self,
        cache: &BoundedCache<RasterImage>,
        image: &RasterImage,
        target_width: i32,
        target_height: i32,
        cache_key: Option<&CacheKey>,
    ) -> RasterImage {
        if target_width <= 0 || target_height <= 0 {
            return image.clone();
        }

        let fit_key = cache_key.map(|key| key.fitted(target_width, target_height));
        if let Some(key) = &fit_key {
            if let Some(cached) = cache.get(key.as_str()) {
                return cached;
            }
        }

        let (width, height) = (target_width as u32, target_height as u32);
        if image.width() == width && image.height() == height {
            return image.clone();
        }

        let Some(scaled) = resample_bilinear(image, width, height) else {
            tracing::warn!(
                from_width = image.width(),
                from_height = image.height(),
                width,
                height,
                "Could not resample icon, keeping original size"
            );
            return image.clone();
        };
        self.rescales.fetch_add(1, Ordering::Relaxed);

        if let Some(key) = &fit_key {
            cache.insert(key.as_str(), scaled.clone());
        }
        scaled
    }

    /// Number of resamples actually computed.
    pub fn rescale_count(&self) -> u64 {
        self.rescales.load(Ordering::Relaxed)
    }
}

/// Bilinear resample through a premultiplied tiny-skia pixmap.
///
/// Monochrome input stays monochrome: only the alpha channel is taken from
/// the resample. Returns `None` for empty input or when a pixmap cannot be
/// allocated.
pub fn resample_bilinear(image: &RasterImage, width: u32, height: u32) -> Option<RasterImage> {
    let size = IntSize::from_wh(image.width(), image.height())?;

    let mut data = Vec::with_capacity(image.pixels().len() * 4);
    for p in image.pixels() {
        let c = ColorU8::from_rgba(p.red(), p.green(), p.blue(), p.alpha()).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let source = Pixmap::from_vec(data, size)?;

    let mut target = Pixmap::new(width, height)?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let transform = Transform::from_scale(
        width as f32 / image.width() as f32,
        height as f32 / image.height() as f32,
    );
    target.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);

    let monochrome = image.is_monochrome();
    let pixels = target
        .pixels()
        .iter()
        .map(|p| {
            if monochrome {
                return Argb::white(p.alpha());
            }
            let c = p.demultiply();
            Argb::new(c.alpha(), c.red(), c.green(), c.blue())
        })
        .collect();
    RasterImage::new(width, height, pixels).ok()
}
