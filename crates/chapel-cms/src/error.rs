//! Error types for CMS content fetching.

use std::fmt;
use thiserror::Error;

/// The category of a CMS error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmsErrorCode {
    /// The API token was rejected (401).
    AuthenticationFailed,
    /// The API token lacks permission for the content type (403).
    AuthorizationFailed,
    /// Connection failed, timed out, DNS resolution, etc.
    NetworkError,
    /// Too many requests (429).
    RateLimited,
    /// The CMS returned a 5xx status.
    ServerError,
    /// The body was not the JSON we expected.
    InvalidResponse,
    /// The content type or route does not exist (404).
    NotFound,
    /// Any other 4xx status.
    BadRequest,
    /// Base URL or token configuration is unusable.
    ConfigurationError,
}

impl CmsErrorCode {
    /// Returns true if this error is transient and the request may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
        }
    }

    /// Maps a non-success HTTP status to an error code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::BadRequest,
        }
    }
}

impl fmt::Display for CmsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while reading content from the CMS.
#[derive(Debug, Error)]
pub struct CmsError {
    code: CmsErrorCode,
    message: String,
    /// The API path being fetched, e.g. `/api/events?...`.
    path: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CmsError {
    /// Creates a new error with the given code and message.
    pub fn new(code: CmsErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates an error for a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(CmsErrorCode::from_status(status), message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CmsErrorCode::NetworkError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(CmsErrorCode::InvalidResponse, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(CmsErrorCode::NotFound, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(CmsErrorCode::ConfigurationError, message)
    }

    /// Sets the API path the error relates to.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> CmsErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the API path, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for CmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " ({})", path)?;
        }
        Ok(())
    }
}

/// A specialized Result type for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(CmsErrorCode::NetworkError.is_retryable());
        assert!(CmsErrorCode::RateLimited.is_retryable());
        assert!(CmsErrorCode::ServerError.is_retryable());
        assert!(!CmsErrorCode::AuthenticationFailed.is_retryable());
        assert!(!CmsErrorCode::NotFound.is_retryable());
    }

    #[test]
    fn status_classification() {
        assert_eq!(CmsErrorCode::from_status(401), CmsErrorCode::AuthenticationFailed);
        assert_eq!(CmsErrorCode::from_status(403), CmsErrorCode::AuthorizationFailed);
        assert_eq!(CmsErrorCode::from_status(404), CmsErrorCode::NotFound);
        assert_eq!(CmsErrorCode::from_status(429), CmsErrorCode::RateLimited);
        assert_eq!(CmsErrorCode::from_status(502), CmsErrorCode::ServerError);
        assert_eq!(CmsErrorCode::from_status(400), CmsErrorCode::BadRequest);
        assert_eq!(CmsErrorCode::from_status(418), CmsErrorCode::BadRequest);
    }

    #[test]
    fn error_display_includes_path() {
        let err = CmsError::from_status(503, "HTTP 503").with_path("/api/events");
        assert_eq!(err.to_string(), "server_error: HTTP 503 (/api/events)");
        assert_eq!(err.path(), Some("/api/events"));
        assert!(err.is_retryable());
    }

    #[test]
    fn error_display_without_path() {
        let err = CmsError::invalid_response("expected JSON");
        assert_eq!(err.to_string(), "invalid_response: expected JSON");
    }

    #[test]
    fn error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("reset by peer");
        let err = CmsError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
        assert_eq!(err.code(), CmsErrorCode::NetworkError);
    }
}
