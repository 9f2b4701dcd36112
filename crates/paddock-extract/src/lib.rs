//! # Paddock Extract
//!
//! The inbound request view and the query parameter pipeline for Paddock
//! resources.
//!
//! ## Request
//!
//! [`Request`] exposes the method, URI, headers, body, path parameters and the
//! decoded query string of one inbound request.
//!
//! ## Parameter pipeline
//!
//! A [`ParameterPipeline`] holds an ordered list of [`Validator`]s. Building
//! it against a request yields a [`ParameterSet`]:
//!
//! | Source | Live value | Validated echo | Errors |
//! |--------|-----------|----------------|--------|
//! | Path parameter | under its name | under its name | never |
//! | Valid query value | under the validator's alias | under the query name | - |
//! | Invalid query value | absent | absent | under the query name |
//!
//! ```rust
//! use paddock_extract::{ParameterPipeline, Request, Validator};
//! use paddock_router::Params;
//! use http::Method;
//!
//! let pipeline = ParameterPipeline::new()
//!     .with(Validator::integer("year").alias("publication_year"))
//!     .with(Validator::text("title"));
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/books/?year=abc&title=Dune")
//!     .build();
//!
//! let params = pipeline.build(&request).unwrap();
//! assert!(!params.is_valid());
//! assert!(params.errors().contains_key("year"));
//! assert_eq!(params.get_str("title"), Some("Dune"));
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod parameters;
mod pipeline;
mod validator;

pub use context::{Request, RequestBuilder};
pub use error::ParameterError;
pub use parameters::ParameterSet;
pub use pipeline::ParameterPipeline;
pub use validator::{ParamKind, Validator};

// Re-export useful types from dependencies
pub use paddock_router::Params;
