//! The resource dispatcher.

use crate::definition::{OperationHandler, ResourceDefinition};
use bytes::Bytes;
use http::Response;
use paddock_core::{Collection, ResourceError, ResourceResult};
use paddock_extract::{ParameterSet, Request};
use paddock_response::{
    empty_response, error_response, file_response, normalize, text_response, Payload, Reply,
};
use paddock_router::{Operation, RouteTable};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A resource definition mounted under one URL shape.
///
/// # Example
///
/// ```rust
/// use paddock_extract::Request;
/// use paddock_resource::ResourceDefinition;
/// use paddock_router::RouteTable;
/// use http::{Method, StatusCode};
/// use serde_json::json;
///
/// let resource = ResourceDefinition::builder("status")
///     .index(|_, _| Ok(json!({"ok": true})))
///     .build()
///     .mount(RouteTable::collection());
///
/// let response = resource.handle(&Request::builder().uri("/status/").build()).unwrap();
/// assert_eq!(response.status(), StatusCode::OK);
///
/// let post = Request::builder().method(Method::POST).uri("/status/").build();
/// assert_eq!(resource.handle(&post).unwrap().status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct Resource {
    definition: Arc<ResourceDefinition>,
    routes: RouteTable,
}

impl Resource {
    /// Mounts a definition under a route table.
    #[must_use]
    pub fn new(definition: Arc<ResourceDefinition>, routes: RouteTable) -> Self {
        Self { definition, routes }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the shared definition.
    #[must_use]
    pub fn definition(&self) -> &Arc<ResourceDefinition> {
        &self.definition
    }

    /// Returns the route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Dispatches a request and renders the response.
    ///
    /// Every failure except [`ResourceError::Unhandled`] is rendered with its
    /// fixed status.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`ResourceError::Unhandled`] failure unchanged.
    pub fn handle(&self, request: &Request) -> Result<Response<Bytes>, ResourceError> {
        let span = tracing::info_span!(
            "dispatch",
            request_id = %request.request_id(),
            http.method = %request.method(),
            http.path = %request.path(),
            resource = %self.name(),
            operation = tracing::field::Empty,
        );
        let _guard = span.enter();

        match self.dispatch(request, &span) {
            Ok(response) => {
                tracing::debug!(http.status_code = response.status().as_u16(), "dispatched");
                Ok(response)
            }
            Err(ResourceError::InvalidStatusCode(violation)) => {
                tracing::error!(error = %violation, "handler returned an invalid status");
                Ok(error_response(&ResourceError::InvalidStatusCode(violation)))
            }
            Err(err) if err.is_recoverable() => {
                let response = error_response(&err);
                match &err {
                    ResourceError::MethodNotAllowed { .. }
                    | ResourceError::HandlerNotImplemented { .. } => {
                        tracing::debug!(error = %err, code = err.error_code(), "not routed");
                    }
                    _ => tracing::warn!(error = %err, code = err.error_code(), "request failed"),
                }
                Ok(response)
            }
            Err(err) => {
                tracing::error!(error = %err, "unhandled handler failure");
                Err(err)
            }
        }
    }

    fn dispatch(&self, request: &Request, span: &tracing::Span) -> ResourceResult<Response<Bytes>> {
        let operation = self
            .routes
            .resolve(request.method())
            .ok_or_else(|| ResourceError::method_not_allowed(request.method().as_str()))?;
        span.record("operation", operation.as_str());

        // Required query parameters are checked before the handler lookup.
        let params = match operation {
            Operation::Index => Some(self.definition.pipeline().build(request)?),
            _ => None,
        };

        let handler = self
            .definition
            .handler(operation)
            .ok_or_else(|| ResourceError::not_implemented(self.name(), operation.as_str()))?;

        let (reply, mut params) = self.invoke(handler, operation, request, params)?;
        self.render(reply, &mut params, request)
    }

    fn invoke(
        &self,
        handler: &OperationHandler,
        operation: Operation,
        request: &Request,
        params: Option<ParameterSet>,
    ) -> ResourceResult<(Reply, ParameterSet)> {
        match handler {
            OperationHandler::Index(index) => {
                let params = match params {
                    Some(params) => params,
                    None => self.definition.pipeline().build(request)?,
                };
                let reply = index(request, &params)?;
                Ok((reply, params))
            }
            OperationHandler::Item(item) => {
                let mut rest = request.path_params().clone();
                let id = rest
                    .remove("id")
                    .ok_or_else(|| ResourceError::required_param_missing("id"))?;
                tracing::trace!(%operation, %id, "item operation");
                let reply = item(request, &id, &rest)?;
                Ok((reply, ParameterSet::new(request.path_params().clone())))
            }
            OperationHandler::Create(create) => {
                let reply = create(request, request.path_params())?;
                Ok((reply, ParameterSet::new(request.path_params().clone())))
            }
        }
    }

    fn render(
        &self,
        reply: Reply,
        params: &mut ParameterSet,
        request: &Request,
    ) -> ResourceResult<Response<Bytes>> {
        let (status, payload) = normalize(reply)?.into_parts();
        let renderer = self.definition.renderer();

        let response = match payload {
            Payload::Record(record) => {
                let object = self
                    .definition
                    .json_builder()
                    .to_json(record.as_ref())
                    .map_err(ResourceError::unhandled)?;
                renderer.render(request, status, &Value::Object(object))
            }
            Payload::Records(collection) => {
                let body = self.collection_body(collection.as_ref(), params, request)?;
                renderer.render(request, status, &body)
            }
            Payload::Json(value) => renderer.render(request, status, &value),
            Payload::Text(text) => text_response(status, text),
            Payload::File(file) => file_response(status, file),
            Payload::Empty => empty_response(status),
            Payload::Passthrough(response) => response,
        };
        Ok(response)
    }

    fn collection_body(
        &self,
        collection: &dyn Collection,
        params: &mut ParameterSet,
        request: &Request,
    ) -> ResourceResult<Value> {
        let (page, echo) = self.definition.page().select(request, collection);
        params.extend_validated(echo);

        let objects = self
            .definition
            .json_builder()
            .to_json_all(page.records())
            .map_err(ResourceError::unhandled)?;
        let meta = self.definition.meta().fetch(collection, &page, params, request);

        if meta.is_empty() {
            return Ok(Value::Array(objects));
        }
        let mut body = Map::new();
        body.insert("Objects".into(), Value::Array(objects));
        body.insert("Meta".into(), Value::Object(meta));
        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::StandardMeta;
    use crate::page::PageConfig;
    use http::{header, Method, StatusCode};
    use paddock_core::{project_with, FieldSpec, Record, RecordSet};
    use paddock_extract::{Params, Validator};
    use paddock_json::MissingFieldPolicy;
    use paddock_response::{unauthorized, FilePayload};
    use serde_json::json;
    use std::fmt;

    struct Book {
        id: u64,
        title: &'static str,
    }

    impl fmt::Display for Book {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.title)
        }
    }

    impl Record for Book {
        fn project(&self, fields: &[&str]) -> Map<String, Value> {
            project_with(fields, |name| match name {
                "id" => Some(json!(self.id)),
                "title" => Some(json!(self.title)),
                _ => None,
            })
        }
    }

    fn shelf(n: u64) -> RecordSet {
        RecordSet::from_records((1..=n).map(|id| Arc::new(Book { id, title: "Dune" })))
    }

    fn request(method: Method, uri: &str, params: Params) -> Request {
        Request::builder().method(method).uri(uri).path_params(params).build()
    }

    fn get(uri: &str) -> Request {
        request(Method::GET, uri, Params::new())
    }

    fn body(response: &Response<Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_index_renders_collection() {
        let resource = ResourceDefinition::builder("books")
            .fields(vec![FieldSpec::attribute("id")])
            .index(|_, _| Ok(shelf(2)))
            .build()
            .mount(RouteTable::collection());

        let response = resource.handle(&get("/books/")).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body(&response), json!([{"id": "1"}, {"id": "2"}]));
    }

    #[test]
    fn test_meta_wraps_collection() {
        let resource = ResourceDefinition::builder("books")
            .fields(vec![FieldSpec::attribute("id")])
            .page(PageConfig::new().with_default_results(1))
            .meta(StandardMeta::new().total_objects().validated_parameters())
            .index(|_, _| Ok(shelf(3)))
            .build()
            .mount(RouteTable::collection());

        let response = resource.handle(&get("/books/?offset=1")).unwrap();

        assert_eq!(
            body(&response),
            json!({
                "Objects": [{"id": "2"}],
                "Meta": {
                    "total_objects": 3,
                    "validated_parameters": {"offset": "1", "results": "1"}
                }
            })
        );
    }

    #[test]
    fn test_index_receives_validated_parameters() {
        let resource = ResourceDefinition::builder("books")
            .validator(Validator::integer("year").alias("publication_year"))
            .index(|_, params| {
                Ok(json!({
                    "year": params.get("publication_year").cloned(),
                    "errors": params.errors().len(),
                }))
            })
            .build()
            .mount(RouteTable::collection());

        let ok = resource.handle(&get("/books/?year=1996")).unwrap();
        assert_eq!(body(&ok), json!({"year": 1996, "errors": 0}));

        let bad = resource.handle(&get("/books/?year=soon")).unwrap();
        assert_eq!(bad.status(), StatusCode::OK);
        assert_eq!(body(&bad), json!({"year": null, "errors": 1}));
    }

    #[test]
    fn test_item_receives_id_and_rest() {
        let resource = ResourceDefinition::builder("books")
            .show(|_, id, rest| Ok(json!({"id": id, "format": rest.get("format")})))
            .build()
            .mount(RouteTable::item());

        let params = Params::new().with("id", "7").with("format", "short");
        let response = resource.handle(&request(Method::GET, "/books/7/", params)).unwrap();

        assert_eq!(body(&response), json!({"id": "7", "format": "short"}));
    }

    #[test]
    fn test_item_without_id_is_bad_request() {
        let resource = ResourceDefinition::builder("books")
            .show(|_, id, _| Ok(json!(id)))
            .build()
            .mount(RouteTable::item());

        let response = resource.handle(&get("/books/")).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unrouted_and_unimplemented_are_not_found() {
        let resource = ResourceDefinition::builder("books")
            .index(|_, _| Ok(json!([])))
            .build()
            .mount(RouteTable::writable_collection());

        let post = request(Method::POST, "/books/", Params::new());
        assert_eq!(resource.handle(&post).unwrap().status(), StatusCode::NOT_FOUND);

        let delete = request(Method::DELETE, "/books/", Params::new());
        assert_eq!(resource.handle(&delete).unwrap().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_lowercase_method_is_routed() {
        let resource = ResourceDefinition::builder("books")
            .index(|_, _| Ok(json!(["Dune"])))
            .build()
            .mount(RouteTable::collection());

        let lower = request(Method::from_bytes(b"get").unwrap(), "/books/", Params::new());
        let response = resource.handle(&lower).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(&response), json!(["Dune"]));
    }

    #[test]
    fn test_missing_required_parameter_precedes_handler_lookup() {
        let resource = ResourceDefinition::builder("books")
            .validator(Validator::integer("year").required())
            .build()
            .mount(RouteTable::collection());

        let missing = resource.handle(&get("/books/")).unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let present = resource.handle(&get("/books/?year=1996")).unwrap();
        assert_eq!(present.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_record_is_serialized() {
        let resource = ResourceDefinition::builder("books")
            .fields(FieldSpec::parse_all(["id", "title"]).unwrap())
            .show(|_, _, _| {
                let book: Arc<dyn Record> = Arc::new(Book { id: 4, title: "Emma" });
                Ok(book)
            })
            .build()
            .mount(RouteTable::item());

        let response = resource
            .handle(&request(Method::GET, "/books/4/", Params::new().with("id", "4")))
            .unwrap();

        assert_eq!(body(&response), json!({"id": "4", "title": "Emma"}));
    }

    #[test]
    fn test_explicit_status_and_markers() {
        let definition = ResourceDefinition::builder("books")
            .create(|_, _| Ok((201u16, json!({"id": 9}))))
            .update(|_, _, _| Ok(Reply::Empty))
            .destroy(|_, _, _| Ok(unauthorized()))
            .build();
        let collection = definition.mount(RouteTable::writable_collection());
        let item = definition.mount(RouteTable::item());
        let id = || Params::new().with("id", "1");

        let created = collection
            .handle(&request(Method::POST, "/books/", Params::new()))
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let updated = item.handle(&request(Method::PUT, "/books/1/", id())).unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        assert!(updated.body().is_empty());

        let destroyed = item.handle(&request(Method::DELETE, "/books/1/", id())).unwrap();
        assert_eq!(destroyed.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_status_renders_diagnostic() {
        let resource = ResourceDefinition::builder("books")
            .index(|_, _| Ok(Reply::with_status("x", json!({"a": 1}))))
            .build()
            .mount(RouteTable::collection());

        let response = resource.handle(&get("/books/")).unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_handler_errors_are_mapped() {
        let resource = ResourceDefinition::builder("books")
            .show(|_, id, _| -> ResourceResult<Value> {
                Err(ResourceError::record_not_found(format!("book {id}")))
            })
            .index(|_, _| FilePayload::open("/nonexistent/catalog.pdf"))
            .build();

        let item = resource.mount(RouteTable::item());
        let missing = item
            .handle(&request(Method::GET, "/books/3/", Params::new().with("id", "3")))
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let list = resource.mount(RouteTable::collection());
        assert_eq!(list.handle(&get("/books/")).unwrap().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unhandled_is_returned() {
        let resource = ResourceDefinition::builder("books")
            .index(|_, _| -> ResourceResult<Value> {
                Err(ResourceError::unhandled(anyhow::anyhow!("database offline")))
            })
            .build()
            .mount(RouteTable::collection());

        let err = resource.handle(&get("/books/")).unwrap_err();
        assert!(matches!(err, ResourceError::Unhandled { .. }));
    }

    #[test]
    fn test_missing_field_policy_error_is_unhandled() {
        let resource = ResourceDefinition::builder("books")
            .fields(FieldSpec::parse_all(["id", "isbn"]).unwrap())
            .missing_fields(MissingFieldPolicy::Error)
            .index(|_, _| Ok(shelf(1)))
            .build()
            .mount(RouteTable::collection());

        assert!(resource.handle(&get("/books/")).is_err());
    }

    #[test]
    fn test_jsonp_and_text_payloads() {
        let resource = ResourceDefinition::builder("books")
            .index(|_, _| Ok(Reply::other(42)))
            .show(|_, _, _| Ok(json!({"id": 1})))
            .build();

        let text = resource
            .mount(RouteTable::collection())
            .handle(&get("/books/"))
            .unwrap();
        assert_eq!(text.body().as_ref(), b"42");

        let jsonp = resource
            .mount(RouteTable::item())
            .handle(&request(
                Method::GET,
                "/books/1/?callback=render",
                Params::new().with("id", "1"),
            ))
            .unwrap();
        assert!(jsonp.body().starts_with(b"callback({"));
    }
}
