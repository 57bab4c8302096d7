//! Error type for raster construction.

use std::fmt;

/// Error returned when pixel data does not match the declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// `pixels.len()` is not `width * height`.
    PixelCountMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    /// RGBA byte buffer length is not `width * height * 4`.
    ByteLengthMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::PixelCountMismatch {
                width,
                height,
                actual,
            } => write!(
                f,
                "expected {} pixels for {}x{}, got {}",
                *width as usize * *height as usize,
                width,
                height,
                actual
            ),
            RasterError::ByteLengthMismatch {
                width,
                height,
                actual,
            } => write!(
                f,
                "expected {} RGBA bytes for {}x{}, got {}",
                *width as usize * *height as usize * 4,
                width,
                height,
                actual
            ),
        }
    }
}

impl std::error::Error for RasterError {}
