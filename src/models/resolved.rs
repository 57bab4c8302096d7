use mono_silhouette::RasterImage;
use serde::Serialize;

/// Result of the colored/monochrome check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_colored: bool,
}

/// Final decision for an icon shown on a status surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedIcon {
    /// Leave the platform icon untouched.
    Passthrough,
    /// Replace it with this white silhouette.
    Monochrome(RasterImage),
}

impl ResolvedIcon {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, ResolvedIcon::Passthrough)
    }

    pub fn monochrome(&self) -> Option<&RasterImage> {
        match self {
            ResolvedIcon::Monochrome(image) => Some(image),
            ResolvedIcon::Passthrough => None,
        }
    }
}
