//! The root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoggingConfig, PaginationConfig, ResponseConfig};
use paddock_telemetry::LogFormat;

/// Complete Paddock configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to layer it from files and
/// environment variables.
///
/// ```
/// use paddock_config::PaddockConfig;
///
/// let config = PaddockConfig::default();
/// assert_eq!(config.pagination.default_results, 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PaddockConfig {
    /// Pagination of list responses.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Response rendering.
    #[serde(default)]
    pub response: ResponseConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PaddockConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `default_results` or `max_results` is zero
    /// - `default_results` exceeds `max_results`
    /// - a parameter name is empty, or both page parameters share a name
    /// - the log level does not parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pagination = &self.pagination;

        if pagination.default_results == 0 {
            return Err(ConfigError::invalid_value(
                "pagination.default_results",
                "must be greater than 0",
            ));
        }
        if pagination.max_results == 0 {
            return Err(ConfigError::invalid_value(
                "pagination.max_results",
                "must be greater than 0",
            ));
        }
        if pagination.default_results > pagination.max_results {
            return Err(ConfigError::invalid_value(
                "pagination.default_results",
                format!(
                    "{} exceeds max_results ({})",
                    pagination.default_results, pagination.max_results
                ),
            ));
        }
        if pagination.offset_param.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "pagination.offset_param",
                "must not be empty",
            ));
        }
        if pagination.results_param.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "pagination.results_param",
                "must not be empty",
            ));
        }
        if pagination.offset_param == pagination.results_param {
            return Err(ConfigError::invalid_value(
                "pagination.results_param",
                "must differ from offset_param",
            ));
        }

        if self
            .response
            .jsonp_params
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigError::invalid_value(
                "response.jsonp_params",
                "parameter names must not be empty",
            ));
        }

        if self.logging.enabled {
            paddock_telemetry::validate_level(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Development preset: pretty debug logging.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: JSON info logging.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }
}
