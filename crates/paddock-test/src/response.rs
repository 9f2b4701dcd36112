//! Test response wrapper.

use crate::error::TestError;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;

/// A dispatched response with assertion helpers.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Wraps an HTTP response.
    #[must_use]
    pub fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Creates a test response from raw parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns a reference to the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        serde_json::from_slice(&self.body).map_err(TestError::Json)
    }

    /// Deserializes the body as a JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// Unwraps a JSONP body (`fn(json)`) and parses the JSON inside.
    pub fn jsonp_value(&self) -> Result<(String, serde_json::Value), TestError> {
        let text = self.text()?;
        let (callback, rest) = text
            .split_once('(')
            .ok_or_else(|| TestError::BodyRead("JSONP body has no '('".to_string()))?;
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| TestError::BodyRead("JSONP body does not end with ')'".to_string()))?;
        Ok((callback.to_string(), serde_json::from_str(inner)?))
    }

    /// Asserts the status.
    ///
    /// # Panics
    ///
    /// Panics if the status doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}",
            expected, self.status
        );
        self
    }

    /// Asserts the status as a u16.
    ///
    /// # Panics
    ///
    /// Panics if the status doesn't match.
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status.as_u16(),
            expected,
            "Expected status {}, got {}",
            expected,
            self.status.as_u16()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or differs.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let expected = expected.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found"));
        assert_eq!(
            actual, expected,
            "Header '{name}': expected '{expected}', got '{actual}'"
        );
        self
    }

    /// Asserts that the Content-Type starts with `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the Content-Type is missing or differs.
    pub fn assert_content_type(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let actual = self
            .content_type()
            .unwrap_or_else(|| panic!("Content-Type header not found"));
        assert!(
            actual.starts_with(expected),
            "Content-Type: expected '{expected}', got '{actual}'"
        );
        self
    }

    /// Asserts that the body is empty.
    ///
    /// # Panics
    ///
    /// Panics if the body has content.
    pub fn assert_empty(&self) -> &Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body, got {} bytes",
            self.body.len()
        );
        self
    }

    /// Asserts that the body contains `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not UTF-8 or lacks the substring.
    pub fn assert_body_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let body = self.text().unwrap_or_else(|e| panic!("{e}"));
        assert!(
            body.contains(expected),
            "Body should contain '{expected}', got: {body}"
        );
        self
    }

    /// Asserts that the JSON body equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON or differs.
    pub fn assert_json_eq(&self, expected: &serde_json::Value) -> &Self {
        let actual = self.json_value().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: StatusCode, content_type: &str, body: &str) -> TestResponse {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        TestResponse::new(status, headers, Bytes::from(body.to_string()))
    }

    #[test]
    fn test_json_helpers() {
        let r = response(StatusCode::OK, "application/json", "[\n  1,\n  2\n]");

        r.assert_status(StatusCode::OK)
            .assert_status_code(200)
            .assert_content_type("application/json")
            .assert_json_eq(&json!([1, 2]));
        assert_eq!(r.json::<Vec<u8>>().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_jsonp_value() {
        let r = response(
            StatusCode::OK,
            "text/javascript; charset=utf-8",
            "handle.books([\n  1\n])",
        );

        let (callback, value) = r.jsonp_value().unwrap();

        assert_eq!(callback, "handle.books");
        assert_eq!(value, json!([1]));
        r.assert_content_type("text/javascript");
    }

    #[test]
    fn test_jsonp_value_rejects_plain_json() {
        let r = response(StatusCode::OK, "application/json", "[1]");
        assert!(r.jsonp_value().is_err());
    }

    #[test]
    fn test_header_and_body() {
        let r = response(StatusCode::NOT_FOUND, "text/plain", "no such thing");

        r.assert_header("content-type", "text/plain")
            .assert_body_contains("no such");
        assert_eq!(r.text().unwrap(), "no such thing");
        assert!(r.json_value().is_err());
    }

    #[test]
    fn test_empty() {
        let r = TestResponse::from_http(http::Response::new(Bytes::new()));
        r.assert_empty().assert_status_code(200);
        assert!(r.content_type().is_none());
    }

    #[test]
    #[should_panic(expected = "Expected status 201 Created, got 200 OK")]
    fn test_assert_status_panics() {
        TestResponse::from_http(http::Response::new(Bytes::new()))
            .assert_status(StatusCode::CREATED);
    }
}
