//! Logging setup for Paddock services.
//!
//! Library crates in the workspace only emit through `tracing` macros. This
//! crate installs the subscriber that turns those events into output and
//! names the fields every dispatch span carries.
//!
//! # Span Fields
//!
//! | Field | Recorded | Example |
//! |-------|----------|---------|
//! | `request_id` | on span creation | `0192b6c4-...` |
//! | `http.method` | on span creation | `GET` |
//! | `http.path` | on span creation | `/books/` |
//! | `resource` | on span creation | `books` |
//! | `operation` | after route resolution | `index` |
//! | `http.status_code` | on completion | `200` |
//!
//! # Example
//!
//! ```rust,ignore
//! use paddock_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! let config = LogConfig {
//!     level: "paddock_resource=debug,info".to_string(),
//!     format: LogFormat::Compact,
//!     ..LogConfig::default()
//! };
//! init_logging(&config)?;
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{
    create_env_filter, fields, init_logging, validate_level, LogConfig, LogFormat,
};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
