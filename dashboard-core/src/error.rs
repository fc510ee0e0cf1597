//! Error types shared by the fetch client and the storage layer.
//!
//! `FetchError`'s `Display` output is the message shown to the user, so
//! callers that only need a string can use `to_string()`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Error: {0}")]
    Transport(String),

    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("Invalid API key.")]
    Unauthorized,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Error Code: {status}\nMessage: {message}")]
    Status { status: u16, message: String },

    /// A success status with a body that didn't match the expected schema.
    #[error("Error Code: {status}\nMessage: {message}")]
    Decode { status: u16, message: String },
}

impl FetchError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            other => FetchError::Status {
                status: other.as_u16(),
                message: other.canonical_reason().unwrap_or("Unknown Error").to_string(),
            },
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
