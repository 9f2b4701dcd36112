//! # Paddock Test
//!
//! In-memory testing for Paddock resources: no server, no port binding.
//!
//! ## Key Features
//!
//! - **URL mounting**: `{name}` segments become path parameters
//! - **Request builder**: methods, query parameters, headers, bodies
//! - **Response assertions**: status, headers, JSON and JSONP bodies
//!
//! ## Example
//!
//! ```
//! use paddock_resource::{ResourceDefinition, RouteTable};
//! use paddock_test::TestClient;
//! use serde_json::json;
//!
//! let books = ResourceDefinition::builder("books")
//!     .index(|_, _| Ok(json!(["A Game of Thrones"])))
//!     .destroy(|_, _, _| Ok(paddock_response::unauthorized()))
//!     .build();
//!
//! let client = TestClient::new()
//!     .mount("/books/", books.mount(RouteTable::collection()))
//!     .mount("/books/{id}/", books.mount(RouteTable::item()));
//!
//! client
//!     .get("/books/")
//!     .query("callback", "show")
//!     .send()
//!     .assert_status_code(200)
//!     .assert_content_type("text/javascript");
//!
//! client.delete("/books/1/").send().assert_status_code(401);
//! ```

#![doc(html_root_url = "https://docs.rs/paddock-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod mount;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use mount::MountPattern;
pub use response::TestResponse;
