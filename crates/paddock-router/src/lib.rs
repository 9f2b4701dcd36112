//! # Paddock Router
//!
//! Maps HTTP methods to the logical operations of a resource and carries the
//! path parameters extracted by the hosting transport.
//!
//! - [`Operation`] - The five resource operations (index, show, create, update, destroy)
//! - [`RouteTable`] - Per-URL table from HTTP method to [`Operation`]
//! - [`Params`] - Path parameters as ordered (name, value) pairs
//!
//! ## Example
//!
//! ```rust
//! use paddock_router::{Operation, RouteTable};
//! use http::Method;
//!
//! let item = RouteTable::item();
//!
//! assert_eq!(item.resolve(&Method::GET), Some(Operation::Show));
//! assert_eq!(item.resolve(&Method::DELETE), Some(Operation::Destroy));
//! assert_eq!(RouteTable::collection().resolve(&Method::POST), None);
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod operation;
mod params;
mod route_table;

pub use operation::Operation;
pub use params::Params;
pub use route_table::RouteTable;
