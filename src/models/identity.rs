//! Icon identities and the cache keys derived from them.
//!
//! Key formats:
//!
//! | Key              | Format                       |
//! |------------------|------------------------------|
//! | resource         | `r_<namespace>_<id>`         |
//! | weak (package)   | `bmp_<package>`              |
//! | unthemed variant | `<key>_raw`                  |
//! | raw resource     | `raw_<namespace>_<id>`       |
//! | descriptor       | `sb_<key>`                   |
//! | fitted           | `fit_<key>_<width>_<height>` |

use crate::error::IconError;
use std::fmt;

/// Where an icon's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconIdentity {
    /// A resource inside a namespace. Equal refs mean pixel-identical sources.
    ResourceRef {
        owner_namespace: String,
        resource_id: i32,
    },
    /// A bitmap with no resource behind it. Only "same owning package" is known.
    Opaque { package_key: String },
}

impl IconIdentity {
    pub fn resource(owner_namespace: impl Into<String>, resource_id: i32) -> Self {
        IconIdentity::ResourceRef {
            owner_namespace: owner_namespace.into(),
            resource_id,
        }
    }

    pub fn opaque(package_key: impl Into<String>) -> Self {
        IconIdentity::Opaque {
            package_key: package_key.into(),
        }
    }

    /// Strict resource key. Fails for opaque identities and resource id 0.
    pub fn resource_key(&self, package: &str) -> Result<CacheKey, IconError> {
        match self {
            IconIdentity::ResourceRef {
                owner_namespace,
                resource_id,
            } if *resource_id != 0 => {
                let ns = namespace_or(owner_namespace, package);
                Ok(CacheKey(format!("r_{ns}_{resource_id}")))
            }
            _ => Err(IconError::UnresolvedIdentity(package.to_string())),
        }
    }
}

/// An identity together with the package that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef {
    package: String,
    identity: IconIdentity,
}

impl IconRef {
    pub fn new(package: impl Into<String>, identity: IconIdentity) -> Self {
        Self {
            package: package.into(),
            identity,
        }
    }

    pub fn resource(package: impl Into<String>, owner_namespace: impl Into<String>, id: i32) -> Self {
        Self::new(package, IconIdentity::resource(owner_namespace, id))
    }

    pub fn opaque(package: impl Into<String>) -> Self {
        let package = package.into();
        Self::new(package.clone(), IconIdentity::opaque(package))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn identity(&self) -> &IconIdentity {
        &self.identity
    }

    /// True when the identity can be keyed as a resource.
    pub fn is_resource(&self) -> bool {
        self.identity.resource_key(&self.package).is_ok()
    }

    /// Resource key, or a weak key when the identity is unresolved.
    ///
    /// Opaque identities are keyed by their own package key, the same one
    /// resolvers load pixels from.
    pub fn cache_key(&self) -> CacheKey {
        match self.identity.resource_key(&self.package) {
            Ok(key) => key,
            Err(e) => {
                tracing::trace!(%e, "Falling back to package key");
                match &self.identity {
                    IconIdentity::Opaque { package_key } => CacheKey::weak(package_key),
                    IconIdentity::ResourceRef { .. } => CacheKey::weak(&self.package),
                }
            }
        }
    }

    /// Key of the raw-resource table. `None` unless this is a keyable resource.
    pub fn raw_resource_key(&self) -> Option<CacheKey> {
        match &self.identity {
            IconIdentity::ResourceRef {
                owner_namespace,
                resource_id,
            } if *resource_id != 0 => {
                let ns = namespace_or(owner_namespace, &self.package);
                Some(CacheKey(format!("raw_{ns}_{resource_id}")))
            }
            _ => None,
        }
    }
}

fn namespace_or<'a>(namespace: &'a str, package: &'a str) -> &'a str {
    if namespace.is_empty() {
        package
    } else {
        namespace
    }
}

/// Cache key string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Per-package key for identities that cannot be keyed precisely.
    pub fn weak(package: &str) -> Self {
        Self(format!("bmp_{package}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for results computed from the unthemed source.
    pub fn raw_path(&self) -> CacheKey {
        CacheKey(format!("{}_raw", self.0))
    }

    /// Key for the final status-bar decision.
    pub fn descriptor(&self) -> CacheKey {
        CacheKey(format!("sb_{}", self.0))
    }

    /// Key for a result fitted to `width` x `height`.
    pub fn fitted(&self, width: i32, height: i32) -> CacheKey {
        CacheKey(format!("fit_{}_{}_{}", self.0, width, height))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
