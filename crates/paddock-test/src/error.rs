//! Test error types.

use paddock_core::ResourceError;
use thiserror::Error;

/// Errors that can occur during testing.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request could not be assembled.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// A header name or value is invalid.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The resource returned an unrecovered failure.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] ResourceError),

    /// The response body is not what the caller asked for.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
