//! # Paddock JSON
//!
//! Turns opaque [`Record`](paddock_core::Record)s into JSON objects according
//! to a declarative [`FieldSpec`](paddock_core::FieldSpec) list.
//!
//! ## Resolution
//!
//! | Entry | Source | Missing target |
//! |-------|--------|----------------|
//! | `Attribute(name)` | the record's projection, then a zero-argument method of that name | skipped |
//! | `Call { method, args }` | [`Record::invoke`](paddock_core::Record::invoke) | skipped (or [`BuildError`] under [`MissingFieldPolicy::Error`]) |
//! | `Nested { name, fields }` | [`Record::related`](paddock_core::Record::related), built recursively | `null` |
//!
//! Entries overlay the projection in declaration order; the last entry to
//! produce a key wins.
//!
//! ```rust
//! use paddock_core::{project_with, FieldSpec, Record};
//! use paddock_json::JsonBuilder;
//! use serde_json::{json, Map, Value};
//! use std::fmt;
//!
//! struct Author;
//!
//! impl fmt::Display for Author {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("George R. R. Martin")
//!     }
//! }
//!
//! impl Record for Author {
//!     fn project(&self, fields: &[&str]) -> Map<String, Value> {
//!         project_with(fields, |name| match name {
//!             "id" => Some(json!(1)),
//!             "name" => Some(json!("George R. R. Martin")),
//!             _ => None,
//!         })
//!     }
//! }
//!
//! let builder = JsonBuilder::new(vec![FieldSpec::attribute("id"), FieldSpec::attribute("name")]);
//! let object = builder.to_json(&Author).unwrap();
//!
//! assert_eq!(Value::Object(object), json!({"id": "1", "name": "George R. R. Martin"}));
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-json/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod error;
mod leaf;

pub use builder::{JsonBuilder, MissingFieldPolicy};
pub use error::BuildError;
pub use leaf::{map_invocation, stringify_leaf};
