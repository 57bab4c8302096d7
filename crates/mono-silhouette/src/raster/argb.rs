//! Packed 32-bit ARGB pixel.

/// A straight (non-premultiplied) 8-bit-per-channel pixel packed as
/// `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black.
    pub const TRANSPARENT: Argb = Argb(0);

    /// RGB bits of pure white.
    pub const WHITE_RGB: u32 = 0x00FF_FFFF;

    /// Build a pixel from its channels.
    ///
    /// ```
    /// use mono_silhouette::Argb;
    /// let red = Argb::new(255, 255, 0, 0);
    /// assert_eq!(red.0, 0xFFFF_0000);
    /// ```
    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Pure white carrying the given alpha. The only pixel shape a
    /// monochrome result may contain.
    #[inline]
    pub const fn white(alpha: u8) -> Self {
        Self((alpha as u32) << 24 | Self::WHITE_RGB)
    }

    /// Build a pixel from `[R, G, B, A]` bytes.
    #[inline]
    pub const fn from_rgba(bytes: [u8; 4]) -> Self {
        Self::new(bytes[3], bytes[0], bytes[1], bytes[2])
    }

    /// Convert to `[R, G, B, A]` bytes.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The 24 RGB bits with alpha cleared.
    #[inline]
    pub const fn rgb(self) -> u32 {
        self.0 & Self::WHITE_RGB
    }

    /// Same RGB, new alpha.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((alpha as u32) << 24 | self.rgb())
    }

    /// HSV-style saturation `(max - min) / max`, or 0 for black.
    #[inline]
    pub fn saturation(self) -> f32 {
        let (r, g, b) = (self.red(), self.green(), self.blue());
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == 0 {
            0.0
        } else {
            (max - min) as f32 / max as f32
        }
    }

    /// Rec. 601 luma `0.299r + 0.587g + 0.114b`, truncated.
    #[inline]
    pub fn luminance(self) -> u8 {
        let l = 0.299 * self.red() as f64 + 0.587 * self.green() as f64 + 0.114 * self.blue() as f64;
        l as u8
    }

    /// Composite `self` over `dst` (straight alpha, source-over).
    pub fn over(self, dst: Argb) -> Argb {
        let sa = self.alpha() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.alpha() as u32;
        let dst_weight = da * (255 - sa) / 255;
        let out_a = sa + dst_weight;
        if out_a == 0 {
            return Argb::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * dst_weight) / out_a) as u8;
        Argb::new(
            out_a as u8,
            mix(self.red(), dst.red()),
            mix(self.green(), dst.green()),
            mix(self.blue(), dst.blue()),
        )
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}
