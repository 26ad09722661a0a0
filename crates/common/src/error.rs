//! Error types shared across movcap crates.

use std::path::PathBuf;

/// Top-level error type for movcap operations.
///
/// Domain-specific failures (recording lifecycle, sink I/O) live as their own
/// enums next to the code that produces them; this type covers the
/// device/platform/config concerns everything else shares.
#[derive(Debug, thiserror::Error)]
pub enum MovcapError {
    #[error("Device error: {message}")]
    Device { message: String },

    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MovcapError.
pub type MovcapResult<T> = Result<T, MovcapError>;

impl MovcapError {
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device {
            message: msg.into(),
        }
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
