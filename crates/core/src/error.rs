// Central Error Type for the Core crate

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Missing required value: {0}")]
    MissingRequired(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({code}): {message}")]
    Server { code: i32, message: String },

    #[error("Job {id} ended in state {state}: {message}")]
    JobFailed {
        id: String,
        state: String,
        message: String,
    },

    #[error("Job did not finish after {polls} polls")]
    Timeout { polls: u32 },

    #[error("Service has been released")]
    Released,
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
