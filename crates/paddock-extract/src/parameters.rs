//! The unified, validated parameter set of one request.

use indexmap::IndexMap;
use paddock_router::Params;
use serde_json::{json, Map, Value};

/// Path and validated query values for a single request.
///
/// Path-sourced keys identify the addressed resource and are never rewritten:
/// a validator whose alias or name collides with a path key is recorded
/// nowhere but the error map (if it fails).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: Map<String, Value>,
    path: Params,
    validated: IndexMap<String, String>,
    errors: IndexMap<String, String>,
}

impl ParameterSet {
    /// Seeds a set from path parameters. Each becomes a live string value and
    /// a validated echo; the first value wins for repeated names.
    #[must_use]
    pub fn new(path: Params) -> Self {
        let mut values = Map::new();
        let mut validated = IndexMap::new();
        for (name, value) in &path {
            if !values.contains_key(name) {
                values.insert(name.to_string(), Value::String(value.to_string()));
                validated.insert(name.to_string(), value.to_string());
            }
        }
        Self {
            values,
            path,
            validated,
            errors: IndexMap::new(),
        }
    }

    /// Stores a successfully validated query value.
    ///
    /// The live value goes under `alias`, the echo under `name`.
    pub fn record_valid(&mut self, name: &str, alias: &str, value: Value) {
        if !self.path.contains(alias) {
            self.values.insert(alias.to_string(), value.clone());
        }
        if !self.path.contains(name) {
            self.validated.insert(name.to_string(), display(&value));
        }
    }

    /// Records a validation failure under the original query key.
    pub fn record_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(name.into(), message.into());
    }

    /// Folds extra entries into the validated echo, skipping path keys.
    pub fn extend_validated<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in entries {
            let name = name.into();
            if !self.path.contains(&name) {
                self.validated.insert(name, value.into());
            }
        }
    }

    /// Returns a live value by canonical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns a live value as a string slice, if it is a JSON string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns a live value as an integer, parsing string values.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns true if a live value exists under this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns every live value, path and query alike.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Returns exactly the path-sourced parameters.
    #[must_use]
    pub fn from_path(&self) -> &Params {
        &self.path
    }

    /// Returns the live values that did not come from the path.
    #[must_use]
    pub fn from_query(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(key, _)| !self.path.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns the validated echo: original names to displayable values.
    #[must_use]
    pub fn validated(&self) -> &IndexMap<String, String> {
        &self.validated
    }

    /// Returns the per-field validation messages keyed by query name.
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Returns the errors wrapped as `{"Errors": {...}}`.
    #[must_use]
    pub fn errors_envelope(&self) -> Value {
        json!({ "Errors": self.errors })
    }

    /// Returns true if no query value failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_path_values_are_seeded() {
        let set = ParameterSet::new(Params::new().with("id", "7"));

        assert_eq!(set.get_str("id"), Some("7"));
        assert_eq!(set.get_i64("id"), Some(7));
        assert_eq!(set.validated().get("id").map(String::as_str), Some("7"));
        assert!(set.from_query().is_empty());
        assert!(set.is_valid());
    }

    #[test]
    fn test_alias_and_echo_keys() {
        let mut set = ParameterSet::new(Params::new());
        set.record_valid("year", "publication_date__year", json!(1996));

        assert_eq!(set.get_i64("publication_date__year"), Some(1996));
        assert!(!set.contains("year"));
        assert_eq!(set.validated().get("year").map(String::as_str), Some("1996"));
    }

    #[test]
    fn test_path_wins_on_collision() {
        let mut set = ParameterSet::new(Params::new().with("id", "3"));
        set.record_valid("id", "id", json!(99));
        set.record_valid("other", "id", json!(42));
        set.extend_validated([("id", "0")]);

        assert_eq!(set.get_str("id"), Some("3"));
        assert_eq!(set.validated().get("id").map(String::as_str), Some("3"));
        assert_eq!(set.validated().get("other").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_repeated_path_name_keeps_first() {
        let set = ParameterSet::new(Params::new().with("id", "1").with("id", "2"));
        assert_eq!(set.get_str("id"), Some("1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_errors_envelope() {
        let mut set = ParameterSet::default();
        set.record_error("year", "Query value 'x' failed Integer validation.");

        assert!(!set.is_valid());
        assert_eq!(
            set.errors_envelope(),
            json!({"Errors": {"year": "Query value 'x' failed Integer validation."}})
        );
    }

    #[test]
    fn test_extend_validated_appends_in_order() {
        let mut set = ParameterSet::default();
        set.extend_validated([("offset", "0"), ("results", "25")]);

        let keys: Vec<_> = set.validated().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["offset", "results"]);
        assert!(set.is_empty());
    }

    proptest! {
        #[test]
        fn prop_path_and_query_are_disjoint(
            path in prop::collection::vec(("[a-d]{1,2}", "[0-9]{1,3}"), 0..5),
            query in prop::collection::vec(("[a-d]{1,2}", any::<i32>()), 0..5),
        ) {
            let params: Params = path.into_iter().collect();
            let mut set = ParameterSet::new(params);
            for (name, value) in query {
                set.record_valid(&name, &name, json!(value));
            }

            let from_query = set.from_query();
            for (name, _) in set.from_path() {
                prop_assert!(!from_query.contains_key(name));
            }
        }

        #[test]
        fn prop_is_valid_iff_no_errors(failures in prop::collection::vec("[a-z]{1,4}", 0..4)) {
            let mut set = ParameterSet::default();
            for name in &failures {
                set.record_error(name.clone(), "bad");
            }
            prop_assert_eq!(set.is_valid(), set.errors().is_empty());
            prop_assert_eq!(set.is_valid(), failures.is_empty());
        }
    }
}
