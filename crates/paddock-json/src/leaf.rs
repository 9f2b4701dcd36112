//! Leaf value conversion.

use paddock_core::Invocation;
use serde_json::Value;

/// Converts a projected attribute into its serialized form.
///
/// Strings pass as-is; numbers, booleans and `null` become their JSON text.
/// Arrays and objects are kept structurally.
///
/// ```rust
/// use paddock_json::stringify_leaf;
/// use serde_json::json;
///
/// assert_eq!(stringify_leaf(json!(1996)), json!("1996"));
/// assert_eq!(stringify_leaf(json!(true)), json!("true"));
/// assert_eq!(stringify_leaf(json!(null)), json!("null"));
/// assert_eq!(stringify_leaf(json!([1, 2])), json!([1, 2]));
/// ```
#[must_use]
pub fn stringify_leaf(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Null => Value::String("null".to_string()),
        other => other,
    }
}

/// Converts a method result into its serialized form.
///
/// Records become the list of their display strings and rows are kept as a
/// list. Integers, strings and booleans pass through. Arrays and objects are
/// JSON-encoded into a string; floats and `null` are stringified first and
/// then encoded.
#[must_use]
pub fn map_invocation(invocation: Invocation) -> Value {
    match invocation {
        Invocation::Records(records) => Value::Array(
            records
                .iter()
                .map(|record| Value::String(record.to_string()))
                .collect(),
        ),
        Invocation::Rows(rows) => Value::Array(rows),
        Invocation::Value(value) => match value {
            Value::Number(ref n) if n.is_i64() || n.is_u64() => value,
            Value::String(_) | Value::Bool(_) => value,
            Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
            Value::Number(n) => encoded_text(n.to_string()),
            Value::Null => encoded_text("null".to_string()),
        },
    }
}

fn encoded_text(text: String) -> Value {
    Value::String(Value::String(text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::{Record, RecordSet};
    use serde_json::{json, Map};
    use std::fmt;
    use std::sync::Arc;

    struct Named(&'static str);

    impl fmt::Display for Named {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Record for Named {
        fn project(&self, _fields: &[&str]) -> Map<String, Value> {
            Map::new()
        }
    }

    #[test]
    fn test_stringify_leaf() {
        assert_eq!(stringify_leaf(json!("a")), json!("a"));
        assert_eq!(stringify_leaf(json!(4.5)), json!("4.5"));
        assert_eq!(stringify_leaf(Value::Null), json!("null"));
        assert_eq!(stringify_leaf(json!({"k": 1})), json!({"k": 1}));
    }

    #[test]
    fn test_records_become_display_strings() {
        let records = RecordSet::from_records([Arc::new(Named("Fantasy")), Arc::new(Named("Drama"))]).into_inner();

        assert_eq!(
            map_invocation(Invocation::Records(records)),
            json!(["Fantasy", "Drama"])
        );
    }

    #[test]
    fn test_rows_are_kept() {
        let rows = vec![json!({"name": "Bantam"}), json!({"name": "Voyager"})];
        assert_eq!(map_invocation(Invocation::Rows(rows.clone())), Value::Array(rows));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(map_invocation(json!(3).into()), json!(3));
        assert_eq!(map_invocation(json!("x").into()), json!("x"));
        assert_eq!(map_invocation(json!(false).into()), json!(false));
    }

    #[test]
    fn test_float_and_null_are_stringified_then_encoded() {
        assert_eq!(map_invocation(json!(2.5).into()), json!("\"2.5\""));
        assert_eq!(map_invocation(Value::Null.into()), json!("\"null\""));
    }

    #[test]
    fn test_structured_values_are_encoded_once() {
        let object = map_invocation(json!({"a": 1}).into());
        assert_eq!(object, json!("{\"a\":1}"));

        let decoded: Value = serde_json::from_str(object.as_str().unwrap()).unwrap();
        assert_eq!(decoded, json!({"a": 1}));

        assert_eq!(map_invocation(json!([1, "x"]).into()), json!("[1,\"x\"]"));
    }
}
