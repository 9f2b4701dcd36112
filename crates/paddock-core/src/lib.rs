//! # Paddock Core
//!
//! Core types and traits for the Paddock resource layer.
//!
//! This crate provides the foundational types used throughout Paddock:
//!
//! - [`Record`] - Capability trait for an opaque domain object
//! - [`Collection`] / [`RecordSet`] - Countable, sliceable collections of records
//! - [`FieldSpec`] - Declarative description of a serialized object's JSON body
//! - [`ResourceError`] - Failure taxonomy with its fixed status mapping
//! - [`ContractViolation`] - A handler broke the response contract
//! - [`RequestId`] - UUID v7 request identifier

#![doc(html_root_url = "https://docs.rs/paddock-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod field;
mod record;

pub use context::RequestId;
pub use error::{ContractViolation, ResourceError, ResourceResult};
pub use field::{FieldSpec, ParseFieldSpecError};
pub use record::{project_with, Collection, Invocation, Record, RecordSet};
