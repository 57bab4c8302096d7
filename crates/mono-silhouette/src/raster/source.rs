//! Icon sources: flat bitmaps and layered (foreground/background) icons.

use super::image::RasterImage;

/// A layered icon as hosts ship them: a background plate, a foreground
/// subject and optionally a dedicated monochrome layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayeredIcon {
    pub foreground: Option<RasterImage>,
    pub background: Option<RasterImage>,
    pub monochrome: Option<RasterImage>,
}

/// Pixel source for one icon.
#[derive(Debug, Clone, PartialEq)]
pub enum IconSource {
    Flat(RasterImage),
    Layered(LayeredIcon),
}

impl IconSource {
    /// Render the icon to a single raster.
    ///
    /// Layered icons are composited background first, foreground over it.
    /// Layers are expected to share dimensions; a smaller layer is drawn from
    /// the top-left corner and a larger one is clipped to the first layer's
    /// size.
    pub fn to_raster(&self) -> RasterImage {
        match self {
            IconSource::Flat(image) => image.clone(),
            IconSource::Layered(layers) => layers.flatten(),
        }
    }
}

impl From<RasterImage> for IconSource {
    fn from(image: RasterImage) -> Self {
        IconSource::Flat(image)
    }
}

impl LayeredIcon {
    /// Composite background and foreground into one raster.
    pub fn flatten(&self) -> RasterImage {
        let (base, top) = match (&self.background, &self.foreground) {
            (Some(bg), fg) => (bg, fg.as_ref()),
            (None, Some(fg)) => return fg.clone(),
            (None, None) => return RasterImage::default(),
        };
        let Some(top) = top else {
            return base.clone();
        };
        RasterImage::from_fn(base.width(), base.height(), |x, y| {
            let dst = base.pixel(x, y);
            if x < top.width() && y < top.height() {
                top.pixel(x, y).over(dst)
            } else {
                dst
            }
        })
    }
}
