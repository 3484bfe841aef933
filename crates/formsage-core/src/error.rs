//! Error types for FormSage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern for rule '{code}': {reason}")]
    InvalidPattern { code: String, reason: String },

    #[error("Unknown {field} code: {value}")]
    UnknownCode { field: &'static str, value: String },

    #[error("Duplicate code: {0}")]
    DuplicateCode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is a uniqueness collision the caller may skip past.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateCode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
