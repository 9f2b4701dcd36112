//! Error types for Paddock.
//!
//! [`ResourceError`] is the failure taxonomy shared by handlers and the
//! dispatcher. Every variant except [`ResourceError::Unhandled`] is recovered
//! at the dispatcher boundary and mapped to a fixed status code:
//!
//! | Variant | Status |
//! |---|---|
//! | `MethodNotAllowed` | 404 |
//! | `HandlerNotImplemented` | 404 |
//! | `RequiredParamMissing` | 400 |
//! | `RecordNotFound` | 404 |
//! | `FileNotFound` | 404 |
//! | `InvalidStatusCode` | 500 (diagnostic page) |
//!
//! Unrouted methods deliberately map to 404 rather than 405 so that a client
//! cannot tell an unmapped verb apart from an unmapped resource.

use http::StatusCode;
use thiserror::Error;

/// Result type alias using [`ResourceError`].
pub type ResourceResult<T> = Result<T, ResourceError>;

/// A handler returned an explicit status that is not a usable HTTP status.
///
/// # Example
///
/// ```
/// use paddock_core::ContractViolation;
///
/// let violation = ContractViolation::invalid_status("\"created\"");
/// assert!(violation.to_string().contains("created"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Http status code '{status}' is not valid. Only integers between 100 and 999 are allowed.")]
pub struct ContractViolation {
    status: String,
}

impl ContractViolation {
    /// Creates a violation for an invalid status value.
    #[must_use]
    pub fn invalid_status(status: impl ToString) -> Self {
        Self {
            status: status.to_string(),
        }
    }

    /// Returns the offending status, rendered as text.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Standard error type for resource dispatch.
///
/// # Example
///
/// ```
/// use paddock_core::ResourceError;
/// use http::StatusCode;
///
/// let err = ResourceError::record_not_found("book 7");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert!(err.is_recoverable());
/// ```
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The HTTP method is not routed for this resource.
    #[error("Http method {method} not allowed.")]
    MethodNotAllowed {
        /// The request method.
        method: String,
    },

    /// The method is routed but the resource has no handler for the operation.
    #[error("Resource '{resource}' does not implement '{operation}'.")]
    HandlerNotImplemented {
        /// Resource name.
        resource: String,
        /// Operation name.
        operation: String,
    },

    /// A required parameter is absent from the request.
    #[error("Required parameter '{name}' missing from request.")]
    RequiredParamMissing {
        /// The parameter name as it appears in the request.
        name: String,
    },

    /// A referenced record does not exist.
    #[error("Not found: {message}")]
    RecordNotFound {
        /// Human-readable description of the missing record.
        message: String,
    },

    /// A referenced file does not exist or cannot be read.
    #[error("File not found: {name}")]
    FileNotFound {
        /// File name or path.
        name: String,
        /// The underlying I/O error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The handler broke the response contract.
    #[error(transparent)]
    InvalidStatusCode(#[from] ContractViolation),

    /// Any other handler failure. Not recovered by the dispatcher.
    #[error("Unhandled handler failure: {source}")]
    Unhandled {
        /// The underlying error.
        #[source]
        source: anyhow::Error,
    },
}

impl ResourceError {
    /// Creates a method-not-allowed error.
    #[must_use]
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
        }
    }

    /// Creates a handler-not-implemented error.
    #[must_use]
    pub fn not_implemented(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::HandlerNotImplemented {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    /// Creates a required-parameter-missing error.
    #[must_use]
    pub fn required_param_missing(name: impl Into<String>) -> Self {
        Self::RequiredParamMissing { name: name.into() }
    }

    /// Creates a record-not-found error.
    #[must_use]
    pub fn record_not_found(message: impl Into<String>) -> Self {
        Self::RecordNotFound {
            message: message.into(),
        }
    }

    /// Creates a file-not-found error.
    #[must_use]
    pub fn file_not_found(name: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self::FileNotFound {
            name: name.into(),
            source,
        }
    }

    /// Wraps an arbitrary handler failure.
    pub fn unhandled(source: impl Into<anyhow::Error>) -> Self {
        Self::Unhandled {
            source: source.into(),
        }
    }

    /// Returns true when the dispatcher converts this error into a response.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unhandled { .. })
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. }
            | Self::HandlerNotImplemented { .. }
            | Self::RecordNotFound { .. }
            | Self::FileNotFound { .. } => StatusCode::NOT_FOUND,
            Self::RequiredParamMissing { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidStatusCode(_) | Self::Unhandled { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns a stable machine-readable code, used in log fields.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            Self::HandlerNotImplemented { .. } => "HANDLER_NOT_IMPLEMENTED",
            Self::RequiredParamMissing { .. } => "REQUIRED_PARAM_MISSING",
            Self::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::InvalidStatusCode(_) => "INVALID_STATUS_CODE",
            Self::Unhandled { .. } => "UNHANDLED",
        }
    }
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        Self::FileNotFound {
            name: String::new(),
            source: Some(err),
        }
    }
}
