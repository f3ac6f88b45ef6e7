//! Error types for the framework layer

/// Error type for framework operations
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Resource type not found: {0}")]
    ResourceNotFound(String),

    #[error("Data source type not found: {0}")]
    DataSourceNotFound(String),

    #[error("Provider not configured")]
    ProviderNotConfigured,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("List index {0} out of bounds")]
    IndexOutOfBounds(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for framework operations
pub type Result<T> = std::result::Result<T, FrameworkError>;

impl From<String> for FrameworkError {
    fn from(s: String) -> Self {
        FrameworkError::Custom(s)
    }
}

impl From<&str> for FrameworkError {
    fn from(s: &str) -> Self {
        FrameworkError::Custom(s.to_string())
    }
}
