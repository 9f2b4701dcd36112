//! Typed configuration for Paddock.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides (`PREFIX__SECTION__KEY`)
//! - Strict parsing (unknown fields fail)
//! - Layered loading (defaults → file → env)
//!
//! Each section converts into the runtime type it configures:
//!
//! | Section | Converts into |
//! |---------|---------------|
//! | [`PaginationConfig`] | `paddock_resource::PageConfig` |
//! | [`ResponseConfig`] | `paddock_response::JsonRenderer` |
//! | [`LoggingConfig`] | `paddock_telemetry::LogConfig` |
//!
//! # Configuration File Format
//!
//! ```toml
//! [pagination]
//! offset_param = "offset"
//! results_param = "results"
//! default_results = 25
//! max_results = 50
//!
//! [response]
//! jsonp_params = ["callback", "jsonp"]
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use paddock_config::ConfigLoader;
//! use paddock_telemetry::{init_logging, LogConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_file("paddock.toml")?
//!     .with_env_prefix("PADDOCK")
//!     .load()?;
//!
//! init_logging(&LogConfig::from(&config.logging))?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::PaddockConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paddock_telemetry::LogFormat;
pub use schema::{LoggingConfig, PaginationConfig, ResponseConfig};
