// Error types for postdeck.
// Covers API failures, image decoding, local cache IO and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostdeckError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    BadStatus { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode image: {0}")]
    ImageDecoding(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PostdeckError>;
