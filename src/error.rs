use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    #[error("Unresolved icon identity for package {0}")]
    UnresolvedIdentity(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
