use crate::error::ConfigError;
use mono_silhouette::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration loaded from a YAML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Capacities of the cache tables
    #[serde(default)]
    pub caches: CacheCapacities,

    /// Tuning constants for classification and synthesis
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Packages whose remembered source icon is overwritten on every update
    #[serde(default = "default_always_refresh")]
    pub always_refresh_packages: Vec<String>,
}

fn default_always_refresh() -> Vec<String> {
    vec!["com.android.systemui".to_string()]
}

/// Maximum entries per cache table. Zero disables a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheCapacities {
    pub raw_resource: usize,
    pub monochrome: usize,
    pub fitted: usize,
    pub descriptor: usize,
    pub source_icon: usize,
}

impl Default for CacheCapacities {
    fn default() -> Self {
        Self {
            raw_resource: 50,
            monochrome: 100,
            fitted: 80,
            descriptor: 100,
            source_icon: 256,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caches: CacheCapacities::default(),
            thresholds: Thresholds::default(),
            always_refresh_packages: default_always_refresh(),
        }
    }
}

impl EngineConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    always_refresh = config.always_refresh_packages.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }
}
