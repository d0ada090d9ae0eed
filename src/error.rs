//! Application error type shared by every layer.

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Operation requested on an empty selection, queue or clipboard.
    /// Handled locally and never sent over the wire.
    #[error("{0}")]
    Validation(String),

    /// The storage service rejected the request. Carries the server text verbatim.
    #[error("{0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A batch upload is already in flight.
    #[error("{0}")]
    Busy(String),

    /// The request was cancelled and its result discarded.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn no_files_selected() -> Self {
        AppError::Validation("No files selected".into())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

// Hosts receive errors as their display string.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
