//! Test icons and identities.

use mono_silhouette::{Argb, IconSource, LayeredIcon, RasterImage};
use statusmono::models::IconRef;

/// Package names used across tests
pub mod packages {
    pub const MAIL: &str = "com.example.mail";
    pub const CHAT: &str = "org.example.chat";
    pub const SYSTEM_UI: &str = "com.android.systemui";
}

pub fn mail_icon() -> IconRef {
    IconRef::resource(packages::MAIL, packages::MAIL, 0x7f08_0012)
}

pub fn chat_bitmap() -> IconRef {
    IconRef::opaque(packages::CHAT)
}

/// White disk on an opaque colored plate. Colored, and yields a clean silhouette.
pub fn disk_on_plate(size: u32, radius: f32, plate: Argb) -> RasterImage {
    let c = size as f32 / 2.0;
    RasterImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - c;
        let dy = y as f32 + 0.5 - c;
        if dx * dx + dy * dy <= radius * radius {
            Argb::new(255, 255, 255, 255)
        } else {
            plate
        }
    })
}

/// The standard colored launcher icon: white disk on blue, 64x64
pub fn colored_icon() -> IconSource {
    IconSource::Flat(disk_on_plate(64, 20.0, Argb::new(255, 0, 0, 255)))
}

/// A white glyph on transparency, as already-monochrome status icons ship
pub fn white_glyph() -> IconSource {
    IconSource::Flat(RasterImage::from_fn(24, 24, |x, y| {
        if (6..18).contains(&x) && (6..18).contains(&y) {
            Argb::white(255)
        } else {
            Argb::TRANSPARENT
        }
    }))
}

/// Solid light square. Its silhouette fails the quality gate.
pub fn solid_light_block() -> IconSource {
    IconSource::Flat(RasterImage::filled(32, 32, Argb::new(255, 250, 250, 250)))
}

/// Layered icon with a dedicated monochrome layer
pub fn layered_with_mono() -> IconSource {
    IconSource::Layered(LayeredIcon {
        foreground: Some(disk_on_plate(48, 12.0, Argb::new(255, 220, 30, 30))),
        background: Some(RasterImage::filled(48, 48, Argb::new(255, 30, 160, 30))),
        monochrome: Some(RasterImage::from_fn(48, 48, |x, _| {
            if x < 24 {
                Argb::new(255, 0, 0, 0)
            } else {
                Argb::TRANSPARENT
            }
        })),
    })
}
