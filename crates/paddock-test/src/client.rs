//! In-memory client for mounted resources.

use crate::error::TestError;
use crate::mount::MountPattern;
use crate::response::TestResponse;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use paddock_extract::Request;
use paddock_resource::Resource;
use paddock_router::Params;

/// A test client that dispatches requests to mounted resources without a
/// network.
///
/// Patterns are tried in mount order; the first match handles the request
/// with the captured path parameters. An unmatched path gets an empty 404.
///
/// # Example
///
/// ```
/// use paddock_resource::{ResourceDefinition, RouteTable};
/// use paddock_test::TestClient;
/// use serde_json::json;
///
/// let books = ResourceDefinition::builder("books")
///     .index(|_, params| Ok(json!({"year": params.get_str("year")})))
///     .show(|_, id, _| Ok(json!({"id": id})))
///     .build();
///
/// let client = TestClient::new()
///     .mount("/books/", books.mount(RouteTable::collection()))
///     .mount("/books/{id}/", books.mount(RouteTable::item()));
///
/// client
///     .get("/books/3/")
///     .send()
///     .assert_status_code(200)
///     .assert_json_eq(&json!({"id": "3"}));
///
/// client.get("/authors/").send().assert_status_code(404);
/// ```
#[must_use]
#[derive(Debug, Default)]
pub struct TestClient {
    mounts: Vec<(MountPattern, Resource)>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client with nothing mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a resource under a URL pattern.
    pub fn mount(mut self, pattern: &str, resource: Resource) -> Self {
        self.mounts.push((MountPattern::parse(pattern), resource));
        self
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request builder with a custom method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let mut request = TestClientRequest {
            client: self,
            method,
            uri: uri.as_ref().to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Bytes::new(),
        };
        for (name, value) in &self.default_headers {
            request = request.header(name, value);
        }
        request
    }

    fn route(&self, path: &str) -> Option<(&Resource, Params)> {
        self.mounts
            .iter()
            .find_map(|(pattern, resource)| pattern.matches(path).map(|params| (resource, params)))
    }

    fn dispatch(
        &self,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<TestResponse, TestError> {
        let Some((resource, params)) = self.route(uri.path()) else {
            tracing::debug!(http.path = %uri.path(), "no resource mounted for path");
            return Ok(TestResponse::from_http(paddock_response::empty_response(
                StatusCode::NOT_FOUND,
            )));
        };

        let request = Request::new(method, uri, headers, body, params);
        let response = resource.handle(&request)?;
        Ok(TestResponse::from_http(response))
    }
}

/// A request builder bound to a test client.
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    method: Method,
    uri: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl TestClientRequest<'_> {
    /// Appends a query parameter. Values are URL-encoded.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.headers
            .push((name.as_ref().to_string(), value.as_ref().to_string()));
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and its content type.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => self.header("content-type", "application/json").body(body),
            Err(err) => panic!("JSON body could not be serialized: {err}"),
        }
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the resource returns an
    /// unrecovered failure. Use [`try_send`](Self::try_send) to inspect those.
    pub fn send(self) -> TestResponse {
        self.try_send().unwrap_or_else(|e| panic!("request failed: {e}"))
    }

    /// Sends the request and returns a Result.
    pub fn try_send(self) -> Result<TestResponse, TestError> {
        let uri = self.full_uri()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TestError::InvalidHeader(format!("{name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| TestError::InvalidHeader(format!("{name}: {e}")))?;
            headers.append(header_name, header_value);
        }

        self.client.dispatch(self.method, uri, headers, self.body)
    }

    fn full_uri(&self) -> Result<Uri, TestError> {
        let mut uri = self.uri.clone();
        if !self.query.is_empty() {
            let encoded = serde_urlencoded::to_string(&self.query)
                .map_err(|e| TestError::RequestBuild(e.to_string()))?;
            uri.push(if uri.contains('?') { '&' } else { '?' });
            uri.push_str(&encoded);
        }
        uri.parse()
            .map_err(|e| TestError::RequestBuild(format!("invalid URI '{uri}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::ResourceError;
    use paddock_resource::{ResourceDefinition, RouteTable};
    use serde_json::json;

    fn client() -> TestClient {
        let echo = ResourceDefinition::builder("echo")
            .index(|request, params| {
                Ok(json!({
                    "method": request.method().as_str(),
                    "path": request.path(),
                    "title": request.query("title"),
                    "validated": params.from_query(),
                    "header": request.header("x-custom"),
                }))
            })
            .show(|request, id, rest| {
                Ok(json!({
                    "method": request.method().as_str(),
                    "id": id,
                    "rest": rest.len(),
                    "body": String::from_utf8_lossy(request.body()),
                }))
            })
            .update(|_, id, _| Ok(json!({"updated": id})))
            .destroy(|_, _, _| -> Result<(), _> {
                Err(ResourceError::unhandled(anyhow::anyhow!("database gone")))
            })
            .build();

        TestClient::new()
            .mount("/echo/", echo.mount(RouteTable::collection()))
            .mount("/echo/{id}/", echo.mount(RouteTable::item()))
    }

    #[test]
    fn test_routes_by_pattern() {
        let client = client();

        let list = client.get("/echo/").send();
        list.assert_status_code(200);
        assert_eq!(list.json_value().unwrap()["path"], "/echo/");

        let item = client.get("/echo/42/").send();
        assert_eq!(item.json_value().unwrap()["id"], "42");
        assert_eq!(item.json_value().unwrap()["rest"], 0);
    }

    #[test]
    fn test_query_is_encoded() {
        let client = client();

        let response = client
            .get("/echo/")
            .query("title", "A Game of Thrones")
            .send();

        let body = response.json_value().unwrap();
        assert_eq!(body["title"], "A Game of Thrones");
        assert_eq!(body["validated"], json!({}));
    }

    #[test]
    fn test_headers_and_body() {
        let client = client().with_default_header("x-custom", "yes");

        let list = client.get("/echo/").send();
        assert_eq!(list.json_value().unwrap()["header"], "yes");

        let put = client.put("/echo/1/").json(&json!({"title": "x"})).send();
        assert_eq!(put.json_value().unwrap(), json!({"updated": "1"}));

        let get = client.get("/echo/1/").body("raw").send();
        assert_eq!(get.json_value().unwrap()["body"], "raw");
    }

    #[test]
    fn test_unmounted_path_is_404() {
        client().get("/nothing/").send().assert_status_code(404).assert_empty();
    }

    #[test]
    fn test_unrouted_method_is_404() {
        client().post("/echo/").send().assert_status_code(404);
        client().patch("/echo/1/").send().assert_status_code(200);
    }

    #[test]
    fn test_unhandled_failure_surfaces() {
        let err = client().delete("/echo/1/").try_send().unwrap_err();

        assert!(matches!(err, TestError::Dispatch(ResourceError::Unhandled { .. })));
    }

    #[test]
    fn test_invalid_header_and_uri() {
        let client = client();

        assert!(matches!(
            client.get("/echo/").header("bad header", "x").try_send(),
            Err(TestError::InvalidHeader(_))
        ));
        assert!(matches!(
            client.get("not a uri").try_send(),
            Err(TestError::RequestBuild(_))
        ));
    }

    #[test]
    fn test_mount_order_wins() {
        let first = ResourceDefinition::builder("first")
            .index(|_, _| Ok("first"))
            .build();
        let second = ResourceDefinition::builder("second")
            .index(|_, _| Ok("second"))
            .build();

        let client = TestClient::new()
            .mount("/a/", first.mount(RouteTable::collection()))
            .mount("/a/", second.mount(RouteTable::collection()));

        assert_eq!(client.get("/a/").send().json_value().unwrap(), "first");
    }
}
