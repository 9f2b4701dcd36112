//! # Paddock
//!
//! **Declarative REST resources over any data layer**
//!
//! Paddock turns a resource declaration into request handling:
//!
//! - **Field lists**: attributes, method calls and nested relations, serialized
//!   to JSON through the [`Record`](core::Record) capability trait
//! - **Query validation**: typed validators with aliases, defaults and
//!   per-field error collection
//! - **Pagination and metadata**: offset/results paging, optional
//!   `{"Objects", "Meta"}` envelope with totals and page links
//! - **Flexible handler returns**: records, collections, JSON, files, bare
//!   statuses or prebuilt responses, with explicit status overrides
//! - **JSONP**: opt-in through a callback query parameter
//!
//! Paddock owns no transport. A host hands each request to
//! [`Resource::handle`](resource::Resource::handle) together with the path
//! parameters it extracted from the URL, and sends back the returned
//! `http::Response`.
//!
//! ## Quick Start
//!
//! ```rust
//! use paddock::prelude::*;
//! use serde_json::json;
//!
//! let books = ResourceDefinition::builder("books")
//!     .fields(vec![FieldSpec::attribute("id"), FieldSpec::attribute("title")])
//!     .validator(Validator::integer("year").alias("publication_date__year"))
//!     .meta(StandardMeta::new().total_objects().validated_parameters())
//!     .index(|_, params| Ok(json!({"filters": params.from_query()})))
//!     .destroy(|_, _, _| Ok(unauthorized()))
//!     .build();
//!
//! let list = books.mount(RouteTable::collection());
//! let response = list
//!     .handle(&Request::builder().uri("/books/?year=1996").build())
//!     .unwrap();
//!
//! assert_eq!(response.status(), 200);
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! Request → RouteTable → ParameterPipeline → handler → normalize
//!                                                         ↓
//! Response ← JsonRenderer ← JsonBuilder ← PageConfig + MetaPolicy
//! ```

#![doc(html_root_url = "https://docs.rs/paddock/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export record model and errors
pub use paddock_core as core;

// Re-export routing types
pub use paddock_router as router;

// Re-export request and parameter types
pub use paddock_extract as extract;

// Re-export the JSON builder
pub use paddock_json as json;

// Re-export reply normalization and rendering
pub use paddock_response as response;

// Re-export resource definitions and dispatch
pub use paddock_resource as resource;

// Re-export configuration
pub use paddock_config as config;

// Re-export logging setup
pub use paddock_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use paddock::prelude::*;
/// ```
pub mod prelude {
    pub use paddock_core::{
        project_with, Collection, FieldSpec, Invocation, Record, RecordSet, ResourceError,
        ResourceResult,
    };

    pub use paddock_router::{Operation, Params, RouteTable};

    pub use paddock_extract::{ParamKind, ParameterPipeline, ParameterSet, Request, Validator};

    pub use paddock_json::{JsonBuilder, MissingFieldPolicy};

    pub use paddock_response::{unauthorized, FilePayload, JsonRenderer, Reply};

    pub use paddock_resource::{
        MetaPolicy, NoMeta, PageConfig, Resource, ResourceDefinition, StandardMeta,
    };

    pub use paddock_config::{ConfigLoader, PaddockConfig};

    pub use paddock_telemetry::{init_logging, LogConfig};
}
