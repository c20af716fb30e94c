/// Error types for Tab Porter
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabPorterError {
    #[error("Failed to query tabs: {0}")]
    HostQuery(String),

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed tab entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("Failed to open {url}: {reason}")]
    HostCreate { url: String, reason: String },

    #[error("Failed to download {filename}: {reason}")]
    Download { filename: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T, E = TabPorterError> = std::result::Result<T, E>;
