//! The recursive JSON builder.

use crate::error::BuildError;
use crate::leaf::{map_invocation, stringify_leaf};
use paddock_core::{FieldSpec, Record};
use serde_json::{Map, Value};
use std::sync::Arc;

/// What to do when a declared field has no target on the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFieldPolicy {
    /// Leave the key out of the output.
    #[default]
    Skip,
    /// Fail the build with [`BuildError::MissingField`].
    Error,
}

/// Serializes records according to a field list.
///
/// A builder is immutable and cheap to share; building the same record twice
/// yields the same object as long as the record does not change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonBuilder {
    fields: Vec<FieldSpec>,
    policy: MissingFieldPolicy,
}

impl JsonBuilder {
    /// Creates a builder with the [`MissingFieldPolicy::Skip`] policy.
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            policy: MissingFieldPolicy::Skip,
        }
    }

    /// Sets the missing-field policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the field list.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the missing-field policy.
    #[must_use]
    pub fn policy(&self) -> MissingFieldPolicy {
        self.policy
    }

    /// Builds the JSON object for one record.
    ///
    /// # Errors
    ///
    /// Only under [`MissingFieldPolicy::Error`], when a declared attribute or
    /// call has no target on the record.
    pub fn to_json(&self, record: &dyn Record) -> Result<Map<String, Value>, BuildError> {
        let names = FieldSpec::attribute_names(&self.fields);
        let mut object: Map<String, Value> = record
            .project(&names)
            .into_iter()
            .map(|(key, value)| (key, stringify_leaf(value)))
            .collect();

        for field in &self.fields {
            match field {
                FieldSpec::Nested { name, fields } => {
                    let nested = match record.related(name) {
                        Some(related) => Value::Object(
                            Self::new(fields.clone())
                                .with_policy(self.policy)
                                .to_json(related.as_ref())?,
                        ),
                        None => Value::Null,
                    };
                    object.insert(name.clone(), nested);
                }
                FieldSpec::Call { method, args } => match record.invoke(method, args) {
                    Some(result) => {
                        object.insert(method.clone(), map_invocation(result));
                    }
                    None => self.missing(method, record)?,
                },
                FieldSpec::Attribute(name) => match record.invoke(name, &[]) {
                    Some(result) => {
                        object.insert(name.clone(), map_invocation(result));
                    }
                    None if object.contains_key(name) => {}
                    None => self.missing(name, record)?,
                },
            }
        }

        Ok(object)
    }

    /// Builds the JSON array for a sequence of records.
    pub fn to_json_all(&self, records: &[Arc<dyn Record>]) -> Result<Vec<Value>, BuildError> {
        records
            .iter()
            .map(|record| self.to_json(record.as_ref()).map(Value::Object))
            .collect()
    }

    fn missing(&self, field: &str, record: &dyn Record) -> Result<(), BuildError> {
        match self.policy {
            MissingFieldPolicy::Skip => {
                tracing::trace!(field, "field has no target, skipped");
                Ok(())
            }
            MissingFieldPolicy::Error => Err(BuildError::missing_field(field, record.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::{project_with, Invocation};
    use proptest::prelude::*;
    use serde_json::json;
    use std::fmt;

    struct Author {
        id: u64,
        name: String,
    }

    impl fmt::Display for Author {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.name)
        }
    }

    impl Record for Author {
        fn project(&self, fields: &[&str]) -> Map<String, Value> {
            project_with(fields, |name| match name {
                "id" => Some(json!(self.id)),
                "name" => Some(json!(self.name)),
                _ => None,
            })
        }
    }

    struct Genre(&'static str);

    impl fmt::Display for Genre {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Record for Genre {
        fn project(&self, _fields: &[&str]) -> Map<String, Value> {
            Map::new()
        }
    }

    struct Book {
        id: u64,
        title: String,
        pages: Option<u64>,
        author: Option<Arc<Author>>,
    }

    impl fmt::Display for Book {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.title)
        }
    }

    impl Record for Book {
        fn project(&self, fields: &[&str]) -> Map<String, Value> {
            project_with(fields, |name| match name {
                "id" => Some(json!(self.id)),
                "title" => Some(json!(self.title)),
                "pages" => Some(json!(self.pages)),
                _ => None,
            })
        }

        fn related(&self, name: &str) -> Option<Arc<dyn Record>> {
            match name {
                "author" => self.author.clone().map(|a| a as Arc<dyn Record>),
                _ => None,
            }
        }

        fn invoke(&self, method: &str, args: &[String]) -> Option<Invocation> {
            match method {
                "genres" => Some(Invocation::Records(vec![
                    Arc::new(Genre("Fantasy")) as Arc<dyn Record>,
                    Arc::new(Genre("Drama")),
                ])),
                "title_upper" => Some(json!(self.title.to_uppercase()).into()),
                "word_count" => Some(json!(self.title.split_whitespace().count()).into()),
                "repeat" => Some(json!(args.join("-")).into()),
                _ => None,
            }
        }
    }

    fn book() -> Book {
        Book {
            id: 1,
            title: "A Game of Thrones".into(),
            pages: None,
            author: Some(Arc::new(Author {
                id: 7,
                name: "George R. R. Martin".into(),
            })),
        }
    }

    #[test]
    fn test_attributes_are_stringified() {
        let builder = JsonBuilder::new(FieldSpec::parse_all(["id", "title", "pages"]).unwrap());

        let object = builder.to_json(&book()).unwrap();

        assert_eq!(
            Value::Object(object),
            json!({"id": "1", "title": "A Game of Thrones", "pages": "null"})
        );
    }

    #[test]
    fn test_nested_author_name() {
        let builder = JsonBuilder::new(vec![
            FieldSpec::attribute("id"),
            FieldSpec::nested("author", vec![FieldSpec::attribute("name")]),
        ]);

        let object = builder.to_json(&book()).unwrap();

        assert_eq!(object["author"], json!({"name": "George R. R. Martin"}));
    }

    #[test]
    fn test_absent_relation_is_null() {
        let mut book = book();
        book.author = None;
        let builder = JsonBuilder::new(vec![FieldSpec::nested(
            "author",
            vec![FieldSpec::attribute("name")],
        )]);

        let object = builder.to_json(&book).unwrap();
        assert_eq!(object["author"], Value::Null);
    }

    #[test]
    fn test_calls_are_mapped() {
        let builder = JsonBuilder::new(
            FieldSpec::parse_all(["genres", "word_count", "repeat a b"]).unwrap(),
        );

        let object = builder.to_json(&book()).unwrap();

        assert_eq!(object["genres"], json!(["Fantasy", "Drama"]));
        assert_eq!(object["word_count"], json!(4));
        assert_eq!(object["repeat"], json!("a-b"));
    }

    #[test]
    fn test_attribute_falls_back_to_zero_arg_method() {
        let builder = JsonBuilder::new(vec![FieldSpec::attribute("title_upper")]);

        let object = builder.to_json(&book()).unwrap();
        assert_eq!(object["title_upper"], json!("A GAME OF THRONES"));
    }

    #[test]
    fn test_missing_targets_are_skipped_by_default() {
        let builder = JsonBuilder::new(FieldSpec::parse_all(["id", "isbn", "reviews 5"]).unwrap());

        let object = builder.to_json(&book()).unwrap();

        assert_eq!(object.len(), 1);
        assert!(object.contains_key("id"));
    }

    #[test]
    fn test_missing_targets_error_when_requested() {
        let builder = JsonBuilder::new(FieldSpec::parse_all(["id", "reviews 5"]).unwrap())
            .with_policy(MissingFieldPolicy::Error);

        let err = builder.to_json(&book()).unwrap_err();
        assert_eq!(err, BuildError::missing_field("reviews", "A Game of Thrones"));
    }

    #[test]
    fn test_key_order_follows_declaration() {
        let builder = JsonBuilder::new(FieldSpec::parse_all(["title", "id", "genres"]).unwrap());

        let object = builder.to_json(&book()).unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["title", "id", "genres"]);
    }

    #[test]
    fn test_to_json_all() {
        let records: Vec<Arc<dyn Record>> = vec![Arc::new(book()), Arc::new(book())];
        let builder = JsonBuilder::new(vec![FieldSpec::attribute("id")]);

        let values = builder.to_json_all(&records).unwrap();
        assert_eq!(values, vec![json!({"id": "1"}), json!({"id": "1"})]);
    }

    proptest! {
        #[test]
        fn prop_build_is_idempotent(
            fields in prop::collection::vec(
                prop::sample::select(vec!["id", "title", "pages", "genres", "title_upper", "missing"]),
                0..6,
            ),
            with_author in any::<bool>(),
        ) {
            let mut specs = FieldSpec::parse_all(&fields).unwrap();
            if with_author {
                specs.push(FieldSpec::nested("author", vec![FieldSpec::attribute("name")]));
            }
            let builder = JsonBuilder::new(specs);
            let record = book();

            let first = builder.to_json(&record).unwrap();
            let second = builder.to_json(&record).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
