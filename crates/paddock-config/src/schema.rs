//! Configuration schema types.
//!
//! Each section converts into the runtime type it configures.

use paddock_resource::{
    PageConfig, DEFAULT_MAX_RESULTS, DEFAULT_OFFSET_PARAM, DEFAULT_RESULTS, DEFAULT_RESULTS_PARAM,
};
use paddock_response::{JsonRenderer, DEFAULT_JSONP_PARAMS};
use paddock_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// Pagination section.
///
/// ```
/// use paddock_config::PaginationConfig;
///
/// let page = PaginationConfig {
///     results_param: "limit".to_string(),
///     ..Default::default()
/// }
/// .to_page_config();
///
/// assert_eq!(page.results_param(), "limit");
/// assert_eq!(page.max_results(), 50);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Query parameter carrying the offset.
    #[serde(default = "default_offset_param")]
    pub offset_param: String,

    /// Query parameter carrying the page size.
    #[serde(default = "default_results_param")]
    pub results_param: String,

    /// Page size when the request does not give one.
    #[serde(default = "default_results")]
    pub default_results: usize,

    /// Largest page size a request may ask for.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            offset_param: default_offset_param(),
            results_param: default_results_param(),
            default_results: default_results(),
            max_results: default_max_results(),
        }
    }
}

impl PaginationConfig {
    /// Builds the page selector.
    #[must_use]
    pub fn to_page_config(&self) -> PageConfig {
        PageConfig::new()
            .with_offset_param(self.offset_param.clone())
            .with_results_param(self.results_param.clone())
            .with_default_results(self.default_results)
            .with_max_results(self.max_results)
    }
}

fn default_offset_param() -> String {
    DEFAULT_OFFSET_PARAM.to_string()
}

fn default_results_param() -> String {
    DEFAULT_RESULTS_PARAM.to_string()
}

fn default_results() -> usize {
    DEFAULT_RESULTS
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Response rendering section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Query parameters that switch a JSON response to JSONP. Empty disables
    /// JSONP.
    #[serde(default = "default_jsonp_params")]
    pub jsonp_params: Vec<String>,

    /// Take the JSONP function name from the parameter value instead of the
    /// parameter name.
    #[serde(default)]
    pub jsonp_callback_from_value: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            jsonp_params: default_jsonp_params(),
            jsonp_callback_from_value: false,
        }
    }
}

impl ResponseConfig {
    /// Builds the JSON renderer.
    #[must_use]
    pub fn to_renderer(&self) -> JsonRenderer {
        JsonRenderer::new()
            .with_jsonp_params(self.jsonp_params.iter().cloned())
            .with_callback_from_value(self.jsonp_callback_from_value)
    }
}

fn default_jsonp_params() -> Vec<String> {
    DEFAULT_JSONP_PARAMS.iter().map(ToString::to_string).collect()
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit span open/close events.
    #[serde(default)]
    pub span_events: bool,

    /// Include file and line.
    #[serde(default)]
    pub include_location: bool,

    /// Include the event target.
    #[serde(default = "default_true")]
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            span_events: false,
            include_location: false,
            include_target: true,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            format: config.format,
            span_events: config.span_events,
            file_line_info: config.include_location,
            include_target: config.include_target,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let config = PaginationConfig::default();
        assert_eq!(config.offset_param, "offset");
        assert_eq!(config.results_param, "results");
        assert_eq!(config.default_results, 25);
        assert_eq!(config.max_results, 50);

        let page = config.to_page_config();
        assert_eq!(page.offset_param(), "offset");
        assert_eq!(page.default_results(), 25);
    }

    #[test]
    fn test_response_defaults() {
        let renderer = ResponseConfig::default().to_renderer();
        assert_eq!(renderer.jsonp_params(), ["callback", "jsonp"]);
        assert!(!renderer.callback_from_value());

        let renderer = ResponseConfig {
            jsonp_params: vec![],
            jsonp_callback_from_value: true,
        }
        .to_renderer();
        assert!(renderer.jsonp_params().is_empty());
        assert!(renderer.callback_from_value());
    }

    #[test]
    fn test_logging_conversion() {
        let section = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Compact,
            include_location: true,
            ..Default::default()
        };

        let config = LogConfig::from(&section);

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.file_line_info);
        assert!(config.include_target);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let section: PaginationConfig = toml::from_str("max_results = 100").unwrap();
        assert_eq!(section.max_results, 100);
        assert_eq!(section.default_results, 25);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ResponseConfig, _> = toml::from_str("jsonp = [\"cb\"]");
        assert!(result.is_err());
    }
}
