//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to install the subscriber.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The level or filter directive could not be parsed.
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    /// The output format is not one of `json`, `pretty` or `compact`.
    #[error("Invalid log format '{0}'")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TelemetryError::LoggingInit("already set".to_string());
        assert_eq!(err.to_string(), "Failed to initialize logging: already set");

        let err = TelemetryError::InvalidLevel("loud".to_string());
        assert_eq!(err.to_string(), "Invalid log level 'loud'");

        let err = TelemetryError::InvalidFormat("xml".to_string());
        assert_eq!(err.to_string(), "Invalid log format 'xml'");
    }
}
