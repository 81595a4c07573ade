//! Thumbnail tool error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Capture timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Screenshot service returned status {status}")]
    Status { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to encode {path}: {message}")]
    Encode { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
