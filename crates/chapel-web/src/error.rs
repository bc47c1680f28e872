//! Server error types.

use std::io;

use thiserror::Error;

use chapel_cms::CmsError;

use crate::mail::MailError;

/// Result type for server operations.
pub type WebResult<T> = Result<T, WebError>;

/// Errors that can occur in the server and the CLI.
#[derive(Debug, Error)]
pub enum WebError {
    /// IO error (listener, config file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The CMS could not be read.
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    /// The mail client could not be set up.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WebError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
