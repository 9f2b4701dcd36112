//! Collection metadata.
//!
//! A [`MetaPolicy`] decides what goes into the `"Meta"` object of a list
//! response. An empty map leaves the response as a bare array; anything else
//! wraps it as `{"Objects": [...], "Meta": {...}}`.

use crate::page::Page;
use paddock_core::Collection;
use paddock_extract::{ParameterSet, Request};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Produces the metadata of a list response.
pub trait MetaPolicy: Send + Sync {
    /// Builds the metadata for one page of a collection.
    fn fetch(
        &self,
        collection: &dyn Collection,
        page: &Page,
        params: &ParameterSet,
        request: &Request,
    ) -> Map<String, Value>;
}

/// No metadata: list responses are bare arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMeta;

impl MetaPolicy for NoMeta {
    fn fetch(
        &self,
        _collection: &dyn Collection,
        _page: &Page,
        _params: &ParameterSet,
        _request: &Request,
    ) -> Map<String, Value> {
        Map::new()
    }
}

/// A user-supplied metadata entry.
pub type MetaFn =
    dyn Fn(&dyn Collection, &Page, &ParameterSet, &Request) -> Value + Send + Sync;

/// Metadata assembled from toggled standard entries and custom closures.
///
/// | Toggle | Key | Value |
/// |--------|-----|-------|
/// | `total_objects` | `total_objects` | the collection count |
/// | `validated_parameters` | `validated_parameters` | the validated echo, including pagination |
/// | `with_errors` | `errors` | the per-field validation messages |
/// | `next_page` | `next_page` | path and query of the next page, or `null` |
/// | `previous_page` | `previous_page` | path and query of the previous page, or `null` |
///
/// Custom entries are added after the standard ones, in registration order.
///
/// # Example
///
/// ```rust
/// use paddock_resource::StandardMeta;
/// use serde_json::json;
///
/// let meta = StandardMeta::new()
///     .total_objects()
///     .next_page()
///     .custom("api_version", |_, _, _, _| json!("1.0"));
///
/// assert_eq!(meta.keys(), vec!["total_objects", "next_page", "api_version"]);
/// ```
#[derive(Clone, Default)]
pub struct StandardMeta {
    total_objects: bool,
    validated_parameters: bool,
    with_errors: bool,
    next_page: bool,
    previous_page: bool,
    custom: Vec<(String, Arc<MetaFn>)>,
}

impl StandardMeta {
    /// Creates a policy with every entry disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy with every standard entry enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::new()
            .total_objects()
            .validated_parameters()
            .with_errors()
            .next_page()
            .previous_page()
    }

    /// Adds the collection count.
    #[must_use]
    pub fn total_objects(mut self) -> Self {
        self.total_objects = true;
        self
    }

    /// Adds the validated echo.
    #[must_use]
    pub fn validated_parameters(mut self) -> Self {
        self.validated_parameters = true;
        self
    }

    /// Adds the validation errors.
    #[must_use]
    pub fn with_errors(mut self) -> Self {
        self.with_errors = true;
        self
    }

    /// Adds the next page link.
    #[must_use]
    pub fn next_page(mut self) -> Self {
        self.next_page = true;
        self
    }

    /// Adds the previous page link.
    #[must_use]
    pub fn previous_page(mut self) -> Self {
        self.previous_page = true;
        self
    }

    /// Adds a custom entry.
    pub fn custom<F>(mut self, name: impl Into<String>, entry: F) -> Self
    where
        F: Fn(&dyn Collection, &Page, &ParameterSet, &Request) -> Value + Send + Sync + 'static,
    {
        self.custom.push((name.into(), Arc::new(entry)));
        self
    }

    /// Returns the keys this policy produces, in output order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let standard = [
            (self.total_objects, "total_objects"),
            (self.validated_parameters, "validated_parameters"),
            (self.with_errors, "errors"),
            (self.next_page, "next_page"),
            (self.previous_page, "previous_page"),
        ];
        standard
            .into_iter()
            .filter_map(|(enabled, key)| enabled.then_some(key))
            .chain(self.custom.iter().map(|(name, _)| name.as_str()))
            .collect()
    }
}

impl fmt::Debug for StandardMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardMeta")
            .field("keys", &self.keys())
            .finish()
    }
}

impl MetaPolicy for StandardMeta {
    fn fetch(
        &self,
        collection: &dyn Collection,
        page: &Page,
        params: &ParameterSet,
        request: &Request,
    ) -> Map<String, Value> {
        let mut meta = Map::new();

        if self.total_objects {
            meta.insert("total_objects".into(), Value::from(collection.count()));
        }
        if self.validated_parameters {
            meta.insert("validated_parameters".into(), string_map(params.validated()));
        }
        if self.with_errors {
            meta.insert("errors".into(), string_map(params.errors()));
        }
        if self.next_page {
            let link = page
                .next_offset(collection.count())
                .map_or(Value::Null, |offset| page_link(request, page, offset));
            meta.insert("next_page".into(), link);
        }
        if self.previous_page {
            let link = page
                .previous_offset()
                .map_or(Value::Null, |offset| page_link(request, page, offset));
            meta.insert("previous_page".into(), link);
        }
        for (name, entry) in &self.custom {
            meta.insert(name.clone(), entry(collection, page, params, request));
        }

        meta
    }
}

fn string_map<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Builds `path?query` for another page, keeping the request's other query
/// parameters in their original order.
fn page_link(request: &Request, page: &Page, offset: usize) -> Value {
    let mut pairs: Vec<(&str, String)> = request
        .query_pairs()
        .iter()
        .filter(|(name, _)| name != page.offset_param() && name != page.results_param())
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();
    pairs.push((page.offset_param(), offset.to_string()));
    pairs.push((page.results_param(), page.results().to_string()));

    match serde_urlencoded::to_string(&pairs) {
        Ok(query) => Value::String(format!("{}?{}", request.path(), query)),
        Err(err) => {
            tracing::warn!(error = %err, "page link query could not be encoded");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageConfig;
    use paddock_core::{project_with, Record, RecordSet};
    use paddock_extract::{ParameterPipeline, Validator};
    use serde_json::json;

    struct Item(usize);

    impl fmt::Display for Item {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Record for Item {
        fn project(&self, fields: &[&str]) -> Map<String, Value> {
            project_with(fields, |_| None)
        }
    }

    fn fetch(meta: &dyn MetaPolicy, uri: &str, total: usize) -> Map<String, Value> {
        let request = Request::builder().uri(uri).build();
        let collection = RecordSet::from_records((0..total).map(|i| Arc::new(Item(i))));
        let mut params = ParameterPipeline::new()
            .with(Validator::integer("year"))
            .build(&request)
            .unwrap();
        let (page, echo) = PageConfig::new().select(&request, &collection);
        params.extend_validated(echo);
        meta.fetch(&collection, &page, &params, &request)
    }

    #[test]
    fn test_no_meta_is_empty() {
        assert!(fetch(&NoMeta, "/books/", 3).is_empty());
    }

    #[test]
    fn test_total_and_parameters() {
        let meta = StandardMeta::new()
            .total_objects()
            .validated_parameters()
            .with_errors();

        let result = fetch(&meta, "/books/?year=x", 3);

        assert_eq!(result["total_objects"], json!(3));
        assert_eq!(
            result["validated_parameters"],
            json!({"offset": "0", "results": "25"})
        );
        assert_eq!(
            result["errors"],
            json!({"year": "Query value 'x' failed Integer validation."})
        );
    }

    #[test]
    fn test_page_links() {
        let meta = StandardMeta::new().next_page().previous_page();

        let result = fetch(&meta, "/books/?year=1996&offset=10&results=10", 35);

        assert_eq!(result["next_page"], json!("/books/?year=1996&offset=20&results=10"));
        assert_eq!(result["previous_page"], json!("/books/?year=1996&offset=0&results=10"));
    }

    #[test]
    fn test_page_links_are_null_at_bounds() {
        let meta = StandardMeta::new().next_page().previous_page();

        let result = fetch(&meta, "/books/", 3);

        assert_eq!(result["next_page"], Value::Null);
        assert_eq!(result["previous_page"], Value::Null);
    }

    #[test]
    fn test_custom_entries() {
        let meta = StandardMeta::new().custom("page_size", |_, page, _, _| json!(page.len()));

        let result = fetch(&meta, "/books/?results=2", 5);

        assert_eq!(result["page_size"], json!(2));
    }

    #[test]
    fn test_all_keys() {
        let meta = StandardMeta::all();
        let keys = meta.keys();
        assert_eq!(
            keys,
            vec![
                "total_objects",
                "validated_parameters",
                "errors",
                "next_page",
                "previous_page"
            ]
        );
    }
}
