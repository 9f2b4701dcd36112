//! Declarative field specifications.

use std::str::FromStr;
use thiserror::Error;

/// One entry of a resource's serialization field list.
///
/// Field lists are declared once per resource and are read-only at request
/// time. Their order decides the order of keys in the JSON output.
///
/// # Example
///
/// ```
/// use paddock_core::FieldSpec;
///
/// let fields = vec![
///     FieldSpec::attribute("id"),
///     FieldSpec::attribute("title"),
///     FieldSpec::call("genres_named", ["fantasy"]),
///     FieldSpec::nested("author", vec![FieldSpec::attribute("name")]),
/// ];
///
/// assert_eq!(fields[2].key(), "genres_named");
/// assert_eq!("genres_named fantasy".parse::<FieldSpec>().unwrap(), fields[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// A plain attribute taken from the record's projection.
    Attribute(String),
    /// A method invoked with literal string arguments.
    Call {
        /// Method name; also the output key.
        method: String,
        /// Literal arguments.
        args: Vec<String>,
    },
    /// A related sub-object serialized with its own field list.
    Nested {
        /// Name of the relation; also the output key.
        name: String,
        /// Field list for the sub-object.
        fields: Vec<FieldSpec>,
    },
}

impl FieldSpec {
    /// Creates an attribute entry.
    #[must_use]
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    /// Creates a method-call entry.
    pub fn call<I, S>(method: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Call {
            method: method.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a nested sub-object entry.
    #[must_use]
    pub fn nested(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self::Nested {
            name: name.into(),
            fields,
        }
    }

    /// Returns the key this entry writes in the JSON output.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Attribute(name) | Self::Nested { name, .. } => name,
            Self::Call { method, .. } => method,
        }
    }

    /// Returns the attribute names of a field list, in declaration order.
    #[must_use]
    pub fn attribute_names(fields: &[FieldSpec]) -> Vec<&str> {
        fields
            .iter()
            .filter_map(|field| match field {
                Self::Attribute(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Parses a list of declarative strings.
    pub fn parse_all<I, S>(fields: I) -> Result<Vec<FieldSpec>, ParseFieldSpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fields.into_iter().map(|f| f.as_ref().parse()).collect()
    }
}

/// The declarative string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field specification is empty")]
pub struct ParseFieldSpecError;

impl FromStr for FieldSpec {
    type Err = ParseFieldSpecError;

    /// `"name"` is an attribute; `"method arg1 arg2"` is a call.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let head = tokens.next().ok_or(ParseFieldSpecError)?;
        let args: Vec<String> = tokens.map(str::to_string).collect();

        if args.is_empty() {
            Ok(Self::Attribute(head.to_string()))
        } else {
            Ok(Self::call(head, args))
        }
    }
}
