//! Query parameter validators.

use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

type CustomCheck = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// How a raw query value is validated and converted.
#[derive(Clone)]
pub enum ParamKind {
    /// Signed integer, optionally bounded (inclusive).
    Integer {
        /// Lower bound.
        min: Option<i64>,
        /// Upper bound.
        max: Option<i64>,
    },
    /// Integer greater than zero.
    PositiveInteger,
    /// Finite floating point number.
    Float,
    /// `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
    Boolean,
    /// Free text, optionally length-limited (in characters).
    Text {
        /// Maximum length.
        max_length: Option<usize>,
    },
    /// One of a fixed set of strings.
    Choice(Vec<String>),
    /// ISO calendar date, `YYYY-MM-DD`.
    Date,
    /// A named user-supplied check.
    Custom {
        /// Name used in error messages.
        name: String,
        /// The check; `Err` carries a reason that is only logged.
        check: CustomCheck,
    },
}

impl ParamKind {
    /// Returns the kind's name as used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Integer { .. } => "Integer",
            Self::PositiveInteger => "PositiveInteger",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Text { .. } => "Text",
            Self::Choice(_) => "Choice",
            Self::Date => "Date",
            Self::Custom { name, .. } => name,
        }
    }

    /// Converts a raw value, or explains why it is rejected.
    pub fn check(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Integer { min, max } => {
                let n: i64 = raw.trim().parse().map_err(|_| "not an integer".to_string())?;
                if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
                    return Err(format!("{n} out of range"));
                }
                Ok(json!(n))
            }
            Self::PositiveInteger => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => Ok(json!(n)),
                _ => Err("not a positive integer".to_string()),
            },
            Self::Float => {
                let f: f64 = raw.trim().parse().map_err(|_| "not a number".to_string())?;
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| "not a finite number".to_string())
            }
            Self::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err("not a boolean".to_string()),
            },
            Self::Text { max_length } => match max_length {
                Some(max) if raw.chars().count() > *max => Err(format!("longer than {max}")),
                _ => Ok(Value::String(raw.to_string())),
            },
            Self::Choice(choices) => {
                if choices.iter().any(|c| c == raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err("not an allowed choice".to_string())
                }
            }
            Self::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .map_err(|e| e.to_string()),
            Self::Custom { check, .. } => check(raw),
        }
    }
}

impl fmt::Debug for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { min, max } => f
                .debug_struct("Integer")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Text { max_length } => f
                .debug_struct("Text")
                .field("max_length", max_length)
                .finish(),
            Self::Choice(choices) => f.debug_tuple("Choice").field(choices).finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// A rule turning one query parameter into a canonical, aliased value.
///
/// The validator reads the query key `name` and, on success, stores the value
/// under `alias` in the live parameter set. A failure is reported under
/// `name`, never under the alias.
///
/// # Example
///
/// ```rust
/// use paddock_extract::Validator;
///
/// let year = Validator::integer_range("year", 1000, 9999).alias("publication_year");
/// assert_eq!(year.name(), "year");
/// assert_eq!(year.alias_name(), "publication_year");
/// assert!(year.check("1996").is_ok());
/// assert_eq!(
///     year.check("96").unwrap_err(),
///     "Query value '96' failed Integer validation."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    name: String,
    alias: String,
    kind: ParamKind,
    required: bool,
    default: Option<Value>,
}

impl Validator {
    /// Creates a validator of the given kind; the alias defaults to the name.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            kind,
            required: false,
            default: None,
        }
    }

    /// Unbounded integer.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Integer { min: None, max: None })
    }

    /// Integer within `min..=max`.
    #[must_use]
    pub fn integer_range(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(
            name,
            ParamKind::Integer {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    /// Integer greater than zero, typically a foreign key.
    #[must_use]
    pub fn positive_integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositiveInteger)
    }

    /// Floating point number.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Float)
    }

    /// Boolean flag.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean)
    }

    /// Free text.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Text { max_length: None })
    }

    /// Free text of at most `max_length` characters.
    #[must_use]
    pub fn text_max(name: impl Into<String>, max_length: usize) -> Self {
        Self::new(
            name,
            ParamKind::Text {
                max_length: Some(max_length),
            },
        )
    }

    /// One of a fixed set of values.
    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParamKind::Choice(choices.into_iter().map(Into::into).collect()),
        )
    }

    /// ISO date.
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Date)
    }

    /// A named custom check.
    pub fn custom<F>(name: impl Into<String>, kind_name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::new(
            name,
            ParamKind::Custom {
                name: kind_name.into(),
                check: Arc::new(check),
            },
        )
    }

    /// Sets the internal key the validated value is stored under.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Marks the parameter as required: its absence aborts the request with 400.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the parameter is absent.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the query key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the internal key.
    #[must_use]
    pub fn alias_name(&self) -> &str {
        &self.alias
    }

    /// Returns the validation kind.
    #[must_use]
    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    /// Returns true if the parameter is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value, if any.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Validates a raw value; the error is the message recorded for the field.
    pub fn check(&self, raw: &str) -> Result<Value, String> {
        self.kind.check(raw).map_err(|reason| {
            tracing::trace!(parameter = %self.name, %reason, "query value rejected");
            format!(
                "Query value '{}' failed {} validation.",
                raw,
                self.kind.name()
            )
        })
    }
}
