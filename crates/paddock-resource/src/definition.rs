//! Resource definitions and their builder.

use crate::meta::{MetaPolicy, NoMeta};
use crate::page::PageConfig;
use crate::resource::Resource;
use paddock_core::{FieldSpec, ResourceResult};
use paddock_extract::{ParameterPipeline, ParameterSet, Params, Request, Validator};
use paddock_json::{JsonBuilder, MissingFieldPolicy};
use paddock_response::{JsonRenderer, Reply};
use paddock_router::{Operation, RouteTable};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A list handler: receives the validated parameter set.
pub type IndexFn = dyn Fn(&Request, &ParameterSet) -> ResourceResult<Reply> + Send + Sync;

/// A single-object handler: receives the `id` path parameter and the rest.
pub type ItemFn = dyn Fn(&Request, &str, &Params) -> ResourceResult<Reply> + Send + Sync;

/// A create handler: receives the path parameters.
pub type CreateFn = dyn Fn(&Request, &Params) -> ResourceResult<Reply> + Send + Sync;

/// A registered handler, by calling convention.
#[derive(Clone)]
pub enum OperationHandler {
    /// List convention.
    Index(Arc<IndexFn>),
    /// Show, update and destroy convention.
    Item(Arc<ItemFn>),
    /// Create convention.
    Create(Arc<CreateFn>),
}

impl fmt::Debug for OperationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Index(_) => "Index(..)",
            Self::Item(_) => "Item(..)",
            Self::Create(_) => "Create(..)",
        })
    }
}

/// Everything a resource declares: serialization fields, query validators,
/// pagination, metadata and its handlers.
///
/// Definitions are immutable once built and shared behind an `Arc`, so one
/// definition can be mounted under several URL shapes.
pub struct ResourceDefinition {
    name: String,
    builder: JsonBuilder,
    pipeline: ParameterPipeline,
    page: PageConfig,
    meta: Arc<dyn MetaPolicy>,
    renderer: JsonRenderer,
    handlers: HashMap<Operation, OperationHandler>,
}

impl ResourceDefinition {
    /// Starts building a definition.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(name)
    }

    /// Returns the resource name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the JSON builder.
    #[must_use]
    pub fn json_builder(&self) -> &JsonBuilder {
        &self.builder
    }

    /// Returns the query parameter pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &ParameterPipeline {
        &self.pipeline
    }

    /// Returns the pagination configuration.
    #[must_use]
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the metadata policy.
    #[must_use]
    pub fn meta(&self) -> &dyn MetaPolicy {
        self.meta.as_ref()
    }

    /// Returns the JSON renderer.
    #[must_use]
    pub fn renderer(&self) -> &JsonRenderer {
        &self.renderer
    }

    /// Returns the handler for an operation.
    #[must_use]
    pub fn handler(&self, operation: Operation) -> Option<&OperationHandler> {
        self.handlers.get(&operation)
    }

    /// Returns the implemented operations, in canonical order.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.handlers.contains_key(op))
            .collect()
    }

    /// Mounts the definition under one URL shape.
    #[must_use]
    pub fn mount(self: &Arc<Self>, routes: RouteTable) -> Resource {
        Resource::new(Arc::clone(self), routes)
    }
}

impl fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("name", &self.name)
            .field("fields", &self.builder.fields())
            .field("validators", &self.pipeline.validators().len())
            .field("page", &self.page)
            .field("operations", &self.operations())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ResourceDefinition`].
///
/// # Example
///
/// ```rust
/// use paddock_core::FieldSpec;
/// use paddock_extract::Validator;
/// use paddock_resource::ResourceDefinition;
/// use paddock_router::{Operation, RouteTable};
/// use serde_json::json;
///
/// let books = ResourceDefinition::builder("books")
///     .fields(vec![FieldSpec::attribute("id"), FieldSpec::attribute("title")])
///     .validator(Validator::integer("year").alias("publication_year"))
///     .index(|_request, params| Ok(json!({"filters": params.from_query()})))
///     .show(|_request, id, _rest| Ok(json!({"id": id})))
///     .build();
///
/// assert_eq!(books.operations(), vec![Operation::Index, Operation::Show]);
///
/// let collection = books.mount(RouteTable::collection());
/// let item = books.mount(RouteTable::item());
/// assert_eq!(collection.name(), item.name());
/// ```
#[must_use]
pub struct ResourceBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    policy: MissingFieldPolicy,
    pipeline: ParameterPipeline,
    page: PageConfig,
    meta: Arc<dyn MetaPolicy>,
    renderer: JsonRenderer,
    handlers: HashMap<Operation, OperationHandler>,
}

impl ResourceBuilder {
    /// Creates a builder with no fields, validators or handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            policy: MissingFieldPolicy::Skip,
            pipeline: ParameterPipeline::new(),
            page: PageConfig::new(),
            meta: Arc::new(NoMeta),
            renderer: JsonRenderer::new(),
            handlers: HashMap::new(),
        }
    }

    /// Sets the serialization field list.
    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    /// Appends one field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the missing-field policy of the JSON builder.
    pub fn missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a query validator.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.pipeline.push(validator);
        self
    }

    /// Replaces the whole parameter pipeline.
    pub fn parameters(mut self, pipeline: ParameterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Sets the pagination configuration.
    pub fn page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    /// Sets the metadata policy.
    pub fn meta(mut self, meta: impl MetaPolicy + 'static) -> Self {
        self.meta = Arc::new(meta);
        self
    }

    /// Sets the JSON renderer.
    pub fn renderer(mut self, renderer: JsonRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Registers the list handler.
    pub fn index<F, R>(mut self, handler: F) -> Self
    where
        F: Fn(&Request, &ParameterSet) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        let handler: Arc<IndexFn> =
            Arc::new(move |request: &Request, params: &ParameterSet| -> ResourceResult<Reply> {
                handler(request, params).map(Into::into)
            });
        self.handlers.insert(Operation::Index, OperationHandler::Index(handler));
        self
    }

    /// Registers the show handler.
    pub fn show<F, R>(self, handler: F) -> Self
    where
        F: Fn(&Request, &str, &Params) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        self.item(Operation::Show, handler)
    }

    /// Registers the update handler.
    pub fn update<F, R>(self, handler: F) -> Self
    where
        F: Fn(&Request, &str, &Params) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        self.item(Operation::Update, handler)
    }

    /// Registers the destroy handler.
    pub fn destroy<F, R>(self, handler: F) -> Self
    where
        F: Fn(&Request, &str, &Params) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        self.item(Operation::Destroy, handler)
    }

    /// Registers the create handler.
    pub fn create<F, R>(mut self, handler: F) -> Self
    where
        F: Fn(&Request, &Params) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        let handler: Arc<CreateFn> =
            Arc::new(move |request: &Request, params: &Params| -> ResourceResult<Reply> {
                handler(request, params).map(Into::into)
            });
        self.handlers.insert(Operation::Create, OperationHandler::Create(handler));
        self
    }

    fn item<F, R>(mut self, operation: Operation, handler: F) -> Self
    where
        F: Fn(&Request, &str, &Params) -> ResourceResult<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        let handler: Arc<ItemFn> =
            Arc::new(move |request: &Request, id: &str, rest: &Params| -> ResourceResult<Reply> {
                handler(request, id, rest).map(Into::into)
            });
        self.handlers.insert(operation, OperationHandler::Item(handler));
        self
    }

    /// Finishes the definition.
    pub fn build(self) -> Arc<ResourceDefinition> {
        Arc::new(ResourceDefinition {
            name: self.name,
            builder: JsonBuilder::new(self.fields).with_policy(self.policy),
            pipeline: self.pipeline,
            page: self.page,
            meta: self.meta,
            renderer: self.renderer,
            handlers: self.handlers,
        })
    }
}

impl fmt::Debug for ResourceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBuilder")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
