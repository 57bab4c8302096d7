//! Owned ARGB raster.

use super::argb::Argb;
use super::error::RasterError;

/// A width x height grid of straight ARGB pixels in row-major order.
///
/// Transforms never mutate a raster in place; they build a new one. A raster
/// with zero width or height is valid and empty, and every algorithm in this
/// crate treats it as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
}

/// A [`RasterImage`] whose RGB channels are `0xFFFFFF` on every pixel.
///
/// Produced by every transform in [`crate::silhouette`]; check with
/// [`RasterImage::is_monochrome()`].
pub type MonochromeResult = RasterImage;

impl RasterImage {
    /// Wrap a row-major pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<Argb>) -> Result<Self, RasterError> {
        if pixels.len() != width as usize * height as usize {
            return Err(RasterError::PixelCountMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Argb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Argb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode a tightly packed `[R, G, B, A, ...]` buffer.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, RasterError> {
        if bytes.len() != width as usize * height as usize * 4 {
            return Err(RasterError::ByteLengthMismatch {
                width,
                height,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Argb::from_rgba([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Encode as a tightly packed `[R, G, B, A, ...]` buffer.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&p.to_rgba());
        }
        bytes
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    /// True when width or height is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Argb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// New raster of the same size with `f` applied to every pixel.
    pub fn map_pixels(&self, f: impl Fn(Argb) -> Argb) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// True when every pixel is white and only alpha varies.
    pub fn is_monochrome(&self) -> bool {
        self.pixels.iter().all(|p| p.rgb() == Argb::WHITE_RGB)
    }

    /// Same-size raster from an already computed buffer.
    pub(crate) fn with_pixels(&self, pixels: Vec<Argb>) -> Self {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
