//! Domain object capabilities.
//!
//! Paddock knows nothing about concrete domain types. A data layer exposes
//! its objects through the [`Record`] trait and its query results through
//! [`Collection`]; the JSON builder, normalizer and paginator only ever talk
//! to these traits.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// An opaque domain object.
///
/// `Display` is the record's stringified form, used wherever a record is
/// rendered as a plain string (e.g. a method returning related records).
///
/// # Example
///
/// ```
/// use paddock_core::{project_with, Invocation, Record};
/// use serde_json::{json, Map, Value};
/// use std::fmt;
///
/// struct Genre {
///     id: u64,
///     name: String,
/// }
///
/// impl fmt::Display for Genre {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.name)
///     }
/// }
///
/// impl Record for Genre {
///     fn project(&self, fields: &[&str]) -> Map<String, Value> {
///         project_with(fields, |name| match name {
///             "id" => Some(json!(self.id)),
///             "name" => Some(json!(self.name)),
///             _ => None,
///         })
///     }
///
///     fn invoke(&self, method: &str, _args: &[String]) -> Option<Invocation> {
///         match method {
///             "shout" => Some(Invocation::Value(json!(self.name.to_uppercase()))),
///             _ => None,
///         }
///     }
/// }
///
/// let genre = Genre { id: 1, name: "fantasy".into() };
/// assert_eq!(genre.project(&["name"])["name"], "fantasy");
/// assert!(genre.invoke("missing", &[]).is_none());
/// ```
pub trait Record: fmt::Display + Send + Sync {
    /// Projects the named plain attributes into a JSON object.
    ///
    /// Names the record does not know are left out of the result.
    fn project(&self, fields: &[&str]) -> Map<String, Value>;

    /// Resolves a named sub-object.
    fn related(&self, name: &str) -> Option<Arc<dyn Record>> {
        let _ = name;
        None
    }

    /// Invokes a named method with literal string arguments.
    ///
    /// Returns `None` when no callable of that name exists.
    fn invoke(&self, method: &str, args: &[String]) -> Option<Invocation> {
        let _ = (method, args);
        None
    }
}

/// The result of [`Record::invoke`].
pub enum Invocation {
    /// A collection of records.
    Records(Vec<Arc<dyn Record>>),
    /// A values projection: plain rows rather than full records.
    Rows(Vec<Value>),
    /// Any other value.
    Value(Value),
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Records(records) => f
                .debug_tuple("Records")
                .field(&records.iter().map(ToString::to_string).collect::<Vec<_>>())
                .finish(),
            Self::Rows(rows) => f.debug_tuple("Rows").field(rows).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<Value> for Invocation {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Builds a projection by looking each requested field up with `lookup`.
///
/// Fields for which `lookup` returns `None` are skipped, so unknown names
/// never appear in the output.
pub fn project_with<F>(fields: &[&str], mut lookup: F) -> Map<String, Value>
where
    F: FnMut(&str) -> Option<Value>,
{
    fields
        .iter()
        .filter_map(|name| lookup(name).map(|value| ((*name).to_string(), value)))
        .collect()
}

/// A homogeneous, countable and sliceable collection of records.
///
/// This is the query-set abstraction of the data layer: the dispatcher
/// paginates it without materialising the whole collection.
pub trait Collection: Send + Sync {
    /// Total number of records in the collection.
    fn count(&self) -> usize;

    /// Records in `start..end`, clamped to the collection bounds.
    fn slice(&self, start: usize, end: usize) -> Vec<Arc<dyn Record>>;

    /// Returns true if the collection holds no records.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// A `Vec`-backed [`Collection`].
///
/// # Example
///
/// ```
/// use paddock_core::{project_with, Collection, Record, RecordSet};
/// use serde_json::{Map, Value};
/// use std::fmt;
/// use std::sync::Arc;
///
/// struct Tag(&'static str);
///
/// impl fmt::Display for Tag {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(self.0)
///     }
/// }
///
/// impl Record for Tag {
///     fn project(&self, fields: &[&str]) -> Map<String, Value> {
///         project_with(fields, |_| None)
///     }
/// }
///
/// let set = RecordSet::from_records([Arc::new(Tag("a")), Arc::new(Tag("b"))]);
/// assert_eq!(set.count(), 2);
/// assert_eq!(set.slice(1, 10).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordSet {
    records: Vec<Arc<dyn Record>>,
}

impl RecordSet {
    /// Creates an empty record set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record set from concrete records.
    pub fn from_records<R, I>(records: I) -> Self
    where
        R: Record + 'static,
        I: IntoIterator<Item = Arc<R>>,
    {
        records
            .into_iter()
            .map(|record| record as Arc<dyn Record>)
            .collect()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Arc<dyn Record>) {
        self.records.push(record);
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Record>> {
        self.records.iter()
    }

    /// Consumes the set and returns the records.
    #[must_use]
    pub fn into_inner(self) -> Vec<Arc<dyn Record>> {
        self.records
    }
}

impl Collection for RecordSet {
    fn count(&self) -> usize {
        self.records.len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<Arc<dyn Record>> {
        let end = end.min(self.records.len());
        if start >= end {
            return Vec::new();
        }
        self.records[start..end].to_vec()
    }
}

impl FromIterator<Arc<dyn Record>> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Record>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Arc<dyn Record>>> for RecordSet {
    fn from(records: Vec<Arc<dyn Record>>) -> Self {
        Self { records }
    }
}

impl fmt::Debug for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.records.iter().map(ToString::to_string))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    struct Item {
        id: u64,
    }

    impl fmt::Display for Item {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "item-{}", self.id)
        }
    }

    impl Record for Item {
        fn project(&self, fields: &[&str]) -> Map<String, Value> {
            project_with(fields, |name| (name == "id").then(|| json!(self.id)))
        }
    }

    fn items(n: u64) -> RecordSet {
        RecordSet::from_records((0..n).map(|id| Arc::new(Item { id })))
    }

    #[test]
    fn test_project_with_skips_unknown_fields() {
        let item = Item { id: 4 };
        let projected = item.project(&["id", "unknown"]);

        assert_eq!(projected.len(), 1);
        assert_eq!(projected["id"], json!(4));
    }

    #[test]
    fn test_default_capabilities_are_absent() {
        let item = Item { id: 1 };

        assert!(item.related("author").is_none());
        assert!(item.invoke("anything", &[]).is_none());
    }

    #[test]
    fn test_record_set_slice_bounds() {
        let set = items(5);

        assert_eq!(set.count(), 5);
        assert_eq!(set.slice(0, 2).len(), 2);
        assert_eq!(set.slice(3, 100).len(), 2);
        assert!(set.slice(5, 10).is_empty());
        assert!(set.slice(4, 2).is_empty());
    }

    #[test]
    fn test_record_set_debug_uses_display() {
        let set = items(2);
        assert_eq!(format!("{set:?}"), r#"["item-0", "item-1"]"#);
    }

    #[test]
    fn test_empty_collection() {
        let set = RecordSet::new();
        assert!(Collection::is_empty(&set));
    }

    proptest! {
        #[test]
        fn prop_slice_is_clamped_and_ordered(len in 0u64..40, start in 0usize..60, end in 0usize..60) {
            let set = items(len);
            let slice = set.slice(start, end);

            let expected = end.min(set.count()).saturating_sub(start);
            prop_assert_eq!(slice.len(), expected);
            for (offset, record) in slice.iter().enumerate() {
                prop_assert_eq!(record.to_string(), format!("item-{}", start + offset));
            }
        }

        #[test]
        fn prop_projection_keeps_only_known_fields(fields in prop::collection::vec("[a-z]{1,6}", 0..8)) {
            let item = Item { id: 9 };
            let names: Vec<&str> = fields.iter().map(String::as_str).collect();
            let projected = item.project(&names);

            prop_assert_eq!(projected.contains_key("id"), names.contains(&"id"));
            prop_assert!(projected.keys().all(|key| key == "id"));
        }
    }
}
