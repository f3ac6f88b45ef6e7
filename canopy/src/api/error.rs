//! Error type for dashboard API calls

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Authentication failed: the dashboard rejected the API key")]
    AuthenticationFailed,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// A 404 on read means the remote object is gone; callers drop it from
    /// state instead of reporting an error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
