//! # Paddock Resource
//!
//! Resource definitions and the dispatcher that runs them.
//!
//! A [`ResourceDefinition`] declares how a resource serializes its records,
//! which query parameters it validates, how it paginates and what metadata
//! it attaches, plus one handler per implemented [`Operation`]. Mounting the
//! definition under a [`RouteTable`] yields a [`Resource`] that handles
//! requests:
//!
//! 1. the method is mapped to an operation (unmapped methods get 404)
//! 2. list requests get a validated [`ParameterSet`](paddock_extract::ParameterSet)
//! 3. the handler runs and its [`Reply`](paddock_response::Reply) is normalized
//! 4. collections are paginated, annotated and serialized
//!
//! ## Failure mapping
//!
//! | Failure | Status |
//! |---------|--------|
//! | method not routed, handler not implemented | 404 |
//! | required parameter missing (including `id`) | 400 |
//! | record or file not found | 404 |
//! | invalid explicit status | 500, HTML diagnostic page |
//! | `ResourceError::Unhandled` | returned as `Err` |
//!
//! ## Example
//!
//! ```rust
//! use paddock_core::FieldSpec;
//! use paddock_extract::{Params, Request, Validator};
//! use paddock_resource::{ResourceDefinition, StandardMeta};
//! use paddock_router::RouteTable;
//! use http::Method;
//! use serde_json::json;
//!
//! let books = ResourceDefinition::builder("books")
//!     .fields(vec![FieldSpec::attribute("id"), FieldSpec::attribute("title")])
//!     .validator(Validator::integer("year").alias("publication_date__year"))
//!     .meta(StandardMeta::new().total_objects())
//!     .index(|_, params| Ok(json!({"filters": params.from_query()})))
//!     .destroy(|_, _, _| Ok(paddock_response::unauthorized()))
//!     .build();
//!
//! let list = books.mount(RouteTable::collection());
//! let item = books.mount(RouteTable::item());
//!
//! let response = list.handle(&Request::builder().uri("/books/?year=1996").build()).unwrap();
//! assert_eq!(response.status(), 200);
//!
//! let delete = Request::builder()
//!     .method(Method::DELETE)
//!     .uri("/books/1/")
//!     .path_params(Params::new().with("id", "1"))
//!     .build();
//! assert_eq!(item.handle(&delete).unwrap().status(), 401);
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-resource/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod definition;
mod meta;
mod page;
mod resource;

pub use definition::{
    CreateFn, IndexFn, ItemFn, OperationHandler, ResourceBuilder, ResourceDefinition,
};
pub use meta::{MetaFn, MetaPolicy, NoMeta, StandardMeta};
pub use page::{
    Page, PageConfig, DEFAULT_MAX_RESULTS, DEFAULT_OFFSET_PARAM, DEFAULT_RESULTS,
    DEFAULT_RESULTS_PARAM,
};
pub use resource::Resource;

// Re-export useful types from dependencies
pub use paddock_router::{Operation, RouteTable};
