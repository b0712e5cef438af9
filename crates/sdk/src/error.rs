//! SDK Error Types

use iserver_core::CoreError;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            SdkError::Http {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else if e.is_connect() {
            SdkError::Connection(format!("Connection failed: {}", e))
        } else if e.is_timeout() {
            SdkError::Transport(format!("Request timed out: {}", e))
        } else if e.is_builder() {
            SdkError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            SdkError::Transport(format!("Invalid response body: {}", e))
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

// Adapters report through the core port's error type
impl From<SdkError> for CoreError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Core(e) => e,
            SdkError::Http { status, body } => CoreError::Server {
                code: i32::from(status),
                message: body,
            },
            SdkError::Serialization(e) => CoreError::Serialization(e),
            other => CoreError::Transport(other.to_string()),
        }
    }
}
