//! HTTP method to operation routing.
//!
//! A [`RouteTable`] belongs to one URL shape of a resource (the collection
//! URL, the item URL, ...). It is built once at registration time and keyed
//! by upper-cased method, so lookups ignore ASCII case.

use crate::Operation;
use http::Method;
use std::collections::HashMap;

/// Maps HTTP methods to resource operations for a single URL.
///
/// # Example
///
/// ```rust
/// use paddock_router::{Operation, RouteTable};
/// use http::Method;
///
/// let table = RouteTable::new()
///     .get(Operation::Index)
///     .post(Operation::Create);
///
/// assert_eq!(table.resolve(&Method::GET), Some(Operation::Index));
/// assert_eq!(table.resolve_str("post"), Some(Operation::Create));
/// assert_eq!(table.resolve(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<Method, Operation>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection URL: `GET` lists.
    #[must_use]
    pub fn collection() -> Self {
        Self::new().get(Operation::Index)
    }

    /// Collection URL that also accepts creation: `GET` lists, `POST` creates.
    #[must_use]
    pub fn writable_collection() -> Self {
        Self::collection().post(Operation::Create)
    }

    /// Item URL: `GET` shows, `POST`/`PUT`/`PATCH` update, `DELETE` destroys.
    #[must_use]
    pub fn item() -> Self {
        Self::new()
            .get(Operation::Show)
            .post(Operation::Update)
            .put(Operation::Update)
            .patch(Operation::Update)
            .delete(Operation::Destroy)
    }

    /// Routes `GET`.
    #[must_use]
    pub fn get(self, operation: Operation) -> Self {
        self.method(&Method::GET, operation)
    }

    /// Routes `POST`.
    #[must_use]
    pub fn post(self, operation: Operation) -> Self {
        self.method(&Method::POST, operation)
    }

    /// Routes `PUT`.
    #[must_use]
    pub fn put(self, operation: Operation) -> Self {
        self.method(&Method::PUT, operation)
    }

    /// Routes `PATCH`.
    #[must_use]
    pub fn patch(self, operation: Operation) -> Self {
        self.method(&Method::PATCH, operation)
    }

    /// Routes `DELETE`.
    #[must_use]
    pub fn delete(self, operation: Operation) -> Self {
        self.method(&Method::DELETE, operation)
    }

    /// Routes any method, including extension methods.
    #[must_use]
    pub fn method(mut self, method: &Method, operation: Operation) -> Self {
        self.routes.insert(canonical(method), operation);
        self
    }

    /// Removes the route for a method.
    #[must_use]
    pub fn without(mut self, method: &Method) -> Self {
        self.routes.remove(&canonical(method));
        self
    }

    /// Returns the operation routed for a method, ignoring ASCII case.
    #[must_use]
    pub fn resolve(&self, method: &Method) -> Option<Operation> {
        self.routes.get(&canonical(method)).copied()
    }

    /// Resolves a method name, ignoring ASCII case.
    #[must_use]
    pub fn resolve_str(&self, method: &str) -> Option<Operation> {
        Method::from_bytes(method.as_bytes())
            .ok()
            .and_then(|method| self.resolve(&method))
    }

    /// Returns the methods that have a route: GET, POST, PUT, PATCH and
    /// DELETE first, then any others by name.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.routes.keys().cloned().collect();
        methods.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.as_str().cmp(b.as_str())));
        methods
    }

    /// Returns true if no method is routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn canonical(method: &Method) -> Method {
    let name = method.as_str();
    if !name.bytes().any(|b| b.is_ascii_lowercase()) {
        return method.clone();
    }
    Method::from_bytes(name.to_ascii_uppercase().as_bytes()).unwrap_or_else(|_| method.clone())
}

fn rank(method: &Method) -> usize {
    [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE]
        .iter()
        .position(|m| m == method)
        .unwrap_or(usize::MAX)
}
