//! JSON builder errors.

use thiserror::Error;

/// Failure to resolve a declared field.
///
/// Only produced under [`MissingFieldPolicy::Error`](crate::MissingFieldPolicy::Error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The record neither projects nor exposes a callable for the field.
    #[error("field '{field}' is not available on record '{record}'")]
    MissingField {
        /// The declared field key.
        field: String,
        /// The record's stringified form.
        record: String,
    },
}

impl BuildError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>, record: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            record: record.into(),
        }
    }
}
