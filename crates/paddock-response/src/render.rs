//! Response renderers.
//!
//! | Renderer | Content-Type |
//! |----------|--------------|
//! | [`JsonRenderer`] | `application/json` |
//! | [`JsonRenderer`] with a callback parameter | `text/javascript; charset=utf-8` |
//! | [`text_response`] | `text/plain; charset=utf-8` |
//! | [`file_response`] | guessed from the file name |
//! | [`diagnostic_page`] | `text/html; charset=utf-8` |

use crate::file::FilePayload;
use bytes::Bytes;
use http::{header, HeaderValue, Response, StatusCode};
use paddock_core::{ContractViolation, ResourceError};
use paddock_extract::Request;
use serde_json::Value;

/// Query parameters that switch a JSON response to JSONP, in lookup order.
pub const DEFAULT_JSONP_PARAMS: [&str; 2] = ["callback", "jsonp"];

const JSON_CONTENT_TYPE: &str = "application/json";
const JSONP_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";

/// Renders JSON bodies, switching to JSONP when the request asks for it.
///
/// # Example
///
/// ```rust
/// use paddock_extract::Request;
/// use paddock_response::JsonRenderer;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let renderer = JsonRenderer::new();
///
/// let request = Request::builder().uri("/books/?callback=show").build();
/// let response = renderer.render(&request, StatusCode::OK, &json!({"id": 1}));
///
/// assert_eq!(response.headers()["content-type"], "text/javascript; charset=utf-8");
/// assert_eq!(response.body().as_ref(), b"callback({\n  \"id\": 1\n})");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRenderer {
    jsonp_params: Vec<String>,
    callback_from_value: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self {
            jsonp_params: DEFAULT_JSONP_PARAMS.iter().map(ToString::to_string).collect(),
            callback_from_value: false,
        }
    }
}

impl JsonRenderer {
    /// Creates a renderer recognising `callback` and `jsonp`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the callback parameter names. An empty list disables JSONP.
    pub fn with_jsonp_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jsonp_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Uses the callback parameter's value as the function name when it is a
    /// dotted JavaScript identifier path. Off by default.
    pub fn with_callback_from_value(mut self, enabled: bool) -> Self {
        self.callback_from_value = enabled;
        self
    }

    /// Returns whether the function name may come from the parameter value.
    #[must_use]
    pub fn callback_from_value(&self) -> bool {
        self.callback_from_value
    }

    /// Returns the callback parameter names.
    #[must_use]
    pub fn jsonp_params(&self) -> &[String] {
        &self.jsonp_params
    }

    /// Returns the JSONP function name for a request, if it asks for JSONP.
    ///
    /// The last configured parameter present in the query decides, and its
    /// name is the function name. With
    /// [`with_callback_from_value`](Self::with_callback_from_value) a value
    /// that is a dotted JavaScript identifier path is used instead.
    #[must_use]
    pub fn callback(&self, request: &Request) -> Option<String> {
        self.jsonp_params
            .iter()
            .filter(|param| request.has_query(param))
            .last()
            .map(|param| match request.query(param) {
                Some(value) if self.callback_from_value && is_js_identifier_path(value) => {
                    value.to_string()
                }
                _ => param.clone(),
            })
    }

    /// Renders a JSON value as a pretty-printed (2 spaces) JSON or JSONP body.
    ///
    /// A falsy value (see [`is_falsy`]) is emitted as `[]`.
    #[must_use]
    pub fn render(&self, request: &Request, status: StatusCode, value: &Value) -> Response<Bytes> {
        let empty = Value::Array(Vec::new());
        let value = if is_falsy(value) { &empty } else { value };
        let json = serde_json::to_string_pretty(value).unwrap_or_default();

        match self.callback(request) {
            Some(function) => build(status, JSONP_CONTENT_TYPE, format!("{function}({json})")),
            None => build(status, JSON_CONTENT_TYPE, json),
        }
    }
}

/// Returns true for `null`, `""`, `{}`, `[]`, `false` and zero.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn is_js_identifier_path(value: &str) -> bool {
    value.len() <= 128
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

fn build(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .expect("Failed to build response")
}

/// A `text/plain` response.
#[must_use]
pub fn text_response(status: StatusCode, text: impl Into<String>) -> Response<Bytes> {
    build(status, "text/plain; charset=utf-8", text.into())
}

/// A response without body.
#[must_use]
pub fn empty_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

/// An attachment response for a file payload.
#[must_use]
pub fn file_response(status: StatusCode, file: FilePayload) -> Response<Bytes> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", file.name()));
    let mut response = build(status, file.content_type(), file.content().clone());
    match disposition {
        Ok(value) => {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
        Err(_) => {
            tracing::warn!(file = file.name(), "file name not usable in Content-Disposition");
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, HeaderValue::from_static("attachment"));
        }
    }
    response
}

/// The explicit 401 marker for handlers rejecting a caller.
///
/// ```rust
/// use paddock_response::unauthorized;
///
/// assert_eq!(unauthorized().status(), http::StatusCode::UNAUTHORIZED);
/// ```
#[must_use]
pub fn unauthorized() -> Response<Bytes> {
    empty_response(StatusCode::UNAUTHORIZED)
}

/// The 500 HTML page shown when a handler breaks the response contract.
#[must_use]
pub fn diagnostic_page(violation: &ContractViolation) -> Response<Bytes> {
    let message = escape_html(&violation.to_string());
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Server Error</title></head>\n<body>\n\
         <h1>Server Error (500)</h1>\n<p>{message}</p>\n</body>\n</html>\n"
    );
    build(
        StatusCode::INTERNAL_SERVER_ERROR,
        "text/html; charset=utf-8",
        page,
    )
}

/// Renders a recovered dispatch failure.
///
/// Unrouted methods get an empty 404 so they look like an unknown resource;
/// a missing handler carries its message.
#[must_use]
pub fn error_response(err: &ResourceError) -> Response<Bytes> {
    match err {
        ResourceError::InvalidStatusCode(violation) => diagnostic_page(violation),
        ResourceError::HandlerNotImplemented { .. } => {
            text_response(err.status_code(), err.to_string())
        }
        other => empty_response(other.status_code()),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
