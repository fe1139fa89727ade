//! Error types for the text generation client.

use thiserror::Error;

use artify_core::json_extract::ExtractError;

/// Errors that can occur when calling the model provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed (including timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse the provider's response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// The reply text did not contain the requested JSON shape.
    #[error("reply did not match the requested output: {0}")]
    Reply(#[from] ExtractError),

    /// The API key cannot be sent as a header.
    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,

    /// An image handed to a prompt is not a base64 data URI.
    #[error("prompt image is not a base64 data URI")]
    InvalidImage,
}

/// API error response envelope.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}
