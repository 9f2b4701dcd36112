//! Parameter pipeline errors.
//!
//! Only request-fatal conditions are errors. A query value that fails its
//! validator is recorded in the [`ParameterSet`](crate::ParameterSet)'s
//! error map and dispatch continues.

use paddock_core::ResourceError;
use thiserror::Error;

/// A request-fatal parameter failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// A validator marked as required found no value in the query string.
    #[error("required query parameter missing: {name}")]
    RequiredMissing {
        /// The query key.
        name: String,
    },
}

impl ParameterError {
    /// Creates a required-missing error.
    #[must_use]
    pub fn required_missing(name: impl Into<String>) -> Self {
        Self::RequiredMissing { name: name.into() }
    }

    /// Returns the query key involved.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::RequiredMissing { name } => name,
        }
    }
}

impl From<ParameterError> for ResourceError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::RequiredMissing { name } => Self::required_param_missing(name),
        }
    }
}
