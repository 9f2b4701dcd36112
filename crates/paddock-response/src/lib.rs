//! # Paddock Response
//!
//! Turns whatever a handler returns into an HTTP response.
//!
//! Handlers return a [`Reply`]. [`normalize`] classifies it into a
//! [`NormalizedResponse`] (status plus [`Payload`]); the renderers in this
//! crate then emit the final `http::Response<Bytes>`.
//!
//! ## Classification
//!
//! | Reply | Payload | Status |
//! |-------|---------|--------|
//! | `WithStatus(n, inner)` | `inner`, re-normalized | `n` (integer, valid) |
//! | `Response(r)` | `Passthrough` | `r`'s own, or the override |
//! | `Records(c)` | `Records` | current |
//! | `Record(r)` | `Record` | current |
//! | `Empty` | `Empty` | current |
//! | `Status(n)` | `Empty` | `n` |
//! | `Json(v)` | `Json` | current |
//! | `File(f)` | `File` | current |
//! | `Rows(v)` | `Json` (array) | current |
//! | `Other(s)` | `Text` | current |
//!
//! A non-integer or out-of-range explicit status is a [`ContractViolation`],
//! rendered with [`diagnostic_page`].
//!
//! ```rust
//! use paddock_response::{normalize, ContentKind, Reply};
//! use http::StatusCode;
//! use serde_json::json;
//!
//! let normalized = normalize(Reply::from((201u16, json!({"a": 1})))).unwrap();
//! assert_eq!(normalized.status(), StatusCode::CREATED);
//! assert_eq!(normalized.content_kind(), ContentKind::Json);
//!
//! assert!(normalize(Reply::with_status("x", json!({"a": 1}))).is_err());
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-response/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod file;
mod normalize;
mod render;
mod reply;

pub use file::{content_type_for, FilePayload};
pub use normalize::{normalize, ContentKind, NormalizedResponse, Payload};
pub use render::{
    diagnostic_page, empty_response, error_response, file_response, is_falsy, text_response,
    unauthorized, JsonRenderer, DEFAULT_JSONP_PARAMS,
};
pub use reply::Reply;

// Re-export useful types from dependencies
pub use paddock_core::ContractViolation;
