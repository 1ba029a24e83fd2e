//! Error types shared across Gerbil crates.

use std::path::PathBuf;

/// Top-level error type for Gerbil operations.
#[derive(Debug, thiserror::Error)]
pub enum GerbilError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Vision error: {message}")]
    Vision { message: String },

    #[error("HID transport error: {message}")]
    Transport { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No HID gadget device found at {path}; enable the USB mouse gadget first")]
    DeviceNotFound { path: PathBuf },

    #[error("Frame source exhausted")]
    EndOfStream,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GerbilError.
pub type GerbilResult<T> = Result<T, GerbilError>;

impl GerbilError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn vision(msg: impl Into<String>) -> Self {
        Self::Vision {
            message: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error only signals that a finite frame source ran dry.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_not_found_mentions_path() {
        let err = GerbilError::DeviceNotFound {
            path: PathBuf::from("/dev/hidg7"),
        };
        assert!(err.to_string().contains("/dev/hidg7"));
    }

    #[test]
    fn end_of_stream_is_detected() {
        assert!(GerbilError::EndOfStream.is_end_of_stream());
        assert!(!GerbilError::transport("gone").is_end_of_stream());
    }
}
