//! Error types for capture, clipboard and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning the form region into an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The form region has not been drawn yet.
    #[error("form region is not mounted")]
    Unmounted,

    /// The region has no drawable cells.
    #[error("form region is empty")]
    EmptyRegion,

    /// The rasterizer could not paint the region.
    #[error("rendering failed: {0}")]
    Render(String),

    /// The painted image could not be encoded.
    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Failure while writing to the system clipboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard backend could be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The platform refused the write.
    #[error("clipboard write denied: {0}")]
    Denied(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ClipboardNotSupported => Self::Unavailable(err.to_string()),
            other => Self::Denied(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Top-level failure reported by the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}
