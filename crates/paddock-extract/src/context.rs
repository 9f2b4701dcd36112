//! The inbound request view.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use paddock_core::RequestId;
use paddock_router::Params;

/// One inbound request, as seen by a resource.
///
/// The hosting transport extracts the path parameters from the URL and hands
/// them over together with the request parts. The query string is decoded
/// once, at construction.
///
/// # Example
///
/// ```rust
/// use paddock_extract::{Params, Request};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let request = Request::new(
///     Method::GET,
///     Uri::from_static("/books/3/?format=short&tag=a&tag=b"),
///     HeaderMap::new(),
///     Bytes::new(),
///     Params::new().with("id", "3"),
/// );
///
/// assert_eq!(request.path_params().get("id"), Some("3"));
/// assert_eq!(request.query("format"), Some("short"));
/// assert_eq!(request.query_all("tag"), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    request_id: RequestId,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
    query: Vec<(String, String)>,
}

impl Request {
    /// Creates a new request view.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: Params,
    ) -> Self {
        let query = decode_query(uri.query());
        Self {
            request_id: RequestId::new(),
            method,
            uri,
            headers,
            body,
            path_params,
            query,
        }
    }

    /// Creates a request view from an `http::Request` and its path parameters.
    #[must_use]
    pub fn from_http(request: http::Request<Bytes>, path_params: Params) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts.method, parts.uri, parts.headers, body, path_params)
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Returns the request id used for log correlation.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the raw query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the first value of a query parameter.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value of a query parameter, in order.
    #[must_use]
    pub fn query_all(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns true if the query string carries this parameter.
    #[must_use]
    pub fn has_query(&self, name: &str) -> bool {
        self.query.iter().any(|(n, _)| n == name)
    }

    /// Returns all decoded query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }
}

fn decode_query(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(query) => serde_urlencoded::from_str(query).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "undecodable query string ignored");
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// Builder for constructing a [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI. An unparsable URI leaves the current one untouched.
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        if let Ok(uri) = uri.parse() {
            self.uri = Some(uri);
        }
        self
    }

    /// Adds a single header. Invalid names or values are ignored.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::HeaderName::from_bytes(name.as_bytes()),
            http::HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Sets all path parameters.
    #[must_use]
    pub fn path_params(mut self, params: Params) -> Self {
        self.path_params = params;
        self
    }

    /// Builds the request. Defaults to `GET /`.
    #[must_use]
    pub fn build(self) -> Request {
        Request::new(
            self.method.unwrap_or(Method::GET),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.body,
            self.path_params,
        )
    }
}
