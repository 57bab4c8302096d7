//! Icon resolution seam.
//!
//! The engine never loads platform resources itself. A host hands it an
//! [`IconResolver`] that returns the themed icon (as rendered under the
//! current theme) and, when available, the unthemed original.
//!
//! [`FileResolver`] serves icons from a directory tree:
//!
//! ```text
//! <root>/<namespace>/<id>.png        themed icon
//! <root>/<namespace>/<id>.raw.png    unthemed variant (optional)
//! <root>/<namespace>/<id>.fg.png     layered themed icon: foreground
//! <root>/<namespace>/<id>.bg.png       ... background (optional)
//! <root>/<namespace>/<id>.mono.png     ... monochrome layer (optional)
//! <root>/<package>/icon.png          bitmap icon without a resource
//! ```

use crate::error::IconError;
use crate::models::{IconIdentity, IconRef};
use crate::rendering::read_png;
use mono_silhouette::{IconSource, LayeredIcon, RasterImage};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Supplies icon pixels for an identity.
pub trait IconResolver: Send + Sync {
    /// Icon as the host currently renders it, theming applied
    fn load_themed(&self, icon: &IconRef) -> Result<IconSource, IconError>;

    /// Icon loaded bypassing any theming layer
    fn load_unthemed(&self, icon: &IconRef) -> Result<IconSource, IconError>;
}

/// Resolves icons from PNG files on disk
pub struct FileResolver {
    root: PathBuf,
}

const OPAQUE_STEM: &str = "icon";

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every icon under the root, in path order.
    ///
    /// Each subdirectory is a package. Numeric file stems become resource
    /// identities owned by that package; `icon.png` becomes its opaque icon.
    pub fn discover(&self) -> Result<Vec<IconRef>, IconError> {
        let mut packages: Vec<PathBuf> = std::fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        packages.sort();

        let mut icons = Vec::new();
        for dir in packages {
            let Some(package) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let mut stems = BTreeSet::new();
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let Some(stem) = name.strip_suffix(".png") else {
                    continue;
                };
                // Layer and unthemed variants belong to the base stem
                let base = stem.split('.').next().unwrap_or(stem);
                stems.insert(base.to_string());
            }

            for stem in stems {
                if stem == OPAQUE_STEM {
                    icons.push(IconRef::opaque(package));
                } else if let Ok(id) = stem.parse::<i32>() {
                    icons.push(IconRef::resource(package, package, id));
                } else {
                    tracing::debug!(package, stem = %stem, "Skipping unrecognized icon file");
                }
            }
        }
        Ok(icons)
    }

    /// Directory and file stem for an identity.
    fn location(&self, icon: &IconRef) -> (PathBuf, String) {
        match icon.identity() {
            IconIdentity::ResourceRef {
                owner_namespace,
                resource_id,
            } => {
                let ns = if owner_namespace.is_empty() {
                    icon.package()
                } else {
                    owner_namespace.as_str()
                };
                (self.root.join(ns), resource_id.to_string())
            }
            IconIdentity::Opaque { package_key } => {
                (self.root.join(package_key), OPAQUE_STEM.to_string())
            }
        }
    }

    fn read_optional(path: &Path) -> Result<Option<RasterImage>, IconError> {
        if path.is_file() {
            read_png(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl IconResolver for FileResolver {
    fn load_themed(&self, icon: &IconRef) -> Result<IconSource, IconError> {
        let (dir, stem) = self.location(icon);

        if let Some(flat) = Self::read_optional(&dir.join(format!("{stem}.png")))? {
            return Ok(IconSource::Flat(flat));
        }

        let foreground = Self::read_optional(&dir.join(format!("{stem}.fg.png")))?;
        if foreground.is_none() {
            return Err(IconError::ResourceUnavailable(icon.cache_key().to_string()));
        }
        Ok(IconSource::Layered(LayeredIcon {
            foreground,
            background: Self::read_optional(&dir.join(format!("{stem}.bg.png")))?,
            monochrome: Self::read_optional(&dir.join(format!("{stem}.mono.png")))?,
        }))
    }

    fn load_unthemed(&self, icon: &IconRef) -> Result<IconSource, IconError> {
        let (dir, stem) = self.location(icon);
        match Self::read_optional(&dir.join(format!("{stem}.raw.png")))? {
            Some(raw) => Ok(IconSource::Flat(raw)),
            None => Err(IconError::ResourceUnavailable(
                icon.cache_key().raw_path().to_string(),
            )),
        }
    }
}
