use thiserror::Error;

/// Result type for LP API client operations
pub type Result<T> = std::result::Result<T, LpApiError>;

/// Errors that can occur when using the LP API client
#[derive(Error, Debug)]
pub enum LpApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server rejected the problem (validation or unknown solver backend)
    #[error("Rejected ({kind}): {message}")]
    Rejected { kind: String, message: String },

    /// API returned some other error response
    #[error("API error: {0}")]
    ApiError(String),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request configuration
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed
    #[error("Authentication failed")]
    AuthenticationFailed,
}
