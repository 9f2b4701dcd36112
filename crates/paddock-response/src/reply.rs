//! The handler return type.

use crate::file::FilePayload;
use bytes::Bytes;
use paddock_core::{Collection, Record, RecordSet};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Anything a resource handler may return.
///
/// Most handlers never name a variant: the `From` conversions cover the
/// common shapes.
///
/// ```rust
/// use paddock_response::Reply;
/// use serde_json::json;
///
/// let created: Reply = (201u16, json!({"id": 4})).into();
/// let gone: Reply = 204u16.into();
/// let nothing: Reply = None::<String>.into();
///
/// assert!(matches!(created, Reply::WithStatus(..)));
/// assert!(matches!(gone, Reply::Status(204)));
/// assert!(matches!(nothing, Reply::Empty));
/// ```
pub enum Reply {
    /// An explicit status paired with the real reply. The status must be an
    /// integer HTTP status; any other JSON value breaks the contract.
    WithStatus(Value, Box<Reply>),
    /// An already-built HTTP response.
    Response(http::Response<Bytes>),
    /// A collection of records; paginated and annotated before rendering.
    Records(Box<dyn Collection>),
    /// A single record.
    Record(Arc<dyn Record>),
    /// No body.
    Empty,
    /// No body, with this status.
    Status(i64),
    /// A JSON string, mapping or sequence.
    Json(Value),
    /// A file sent as an attachment.
    File(FilePayload),
    /// A values projection.
    Rows(Vec<Value>),
    /// Anything else, rendered as its string form.
    Other(String),
}

impl Reply {
    /// Pairs an explicit status with a reply.
    pub fn with_status(status: impl Into<Value>, reply: impl Into<Reply>) -> Self {
        Self::WithStatus(status.into(), Box::new(reply.into()))
    }

    /// Wraps a collection.
    pub fn records(collection: impl Collection + 'static) -> Self {
        Self::Records(Box::new(collection))
    }

    /// Wraps a concrete record.
    pub fn record<R: Record + 'static>(record: Arc<R>) -> Self {
        Self::Record(record)
    }

    /// Wraps any displayable value as a plain-text reply.
    pub fn other(value: impl fmt::Display) -> Self {
        Self::Other(value.to_string())
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithStatus(status, inner) => {
                f.debug_tuple("WithStatus").field(status).field(inner).finish()
            }
            Self::Response(response) => f
                .debug_tuple("Response")
                .field(&response.status())
                .finish(),
            Self::Records(collection) => f
                .debug_struct("Records")
                .field("count", &collection.count())
                .finish(),
            Self::Record(record) => f.debug_tuple("Record").field(&record.to_string()).finish(),
            Self::Empty => f.write_str("Empty"),
            Self::Status(status) => f.debug_tuple("Status").field(status).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::File(file) => f.debug_tuple("File").field(&file.name()).finish(),
            Self::Rows(rows) => f.debug_tuple("Rows").field(rows).finish(),
            Self::Other(text) => f.debug_tuple("Other").field(text).finish(),
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<Vec<Value>> for Reply {
    fn from(rows: Vec<Value>) -> Self {
        Self::Rows(rows)
    }
}

impl From<u16> for Reply {
    fn from(status: u16) -> Self {
        Self::Status(i64::from(status))
    }
}

impl<T: Into<Reply>> From<(u16, T)> for Reply {
    fn from((status, reply): (u16, T)) -> Self {
        Self::with_status(status, reply)
    }
}

impl From<Arc<dyn Record>> for Reply {
    fn from(record: Arc<dyn Record>) -> Self {
        Self::Record(record)
    }
}

impl From<RecordSet> for Reply {
    fn from(records: RecordSet) -> Self {
        Self::Records(Box::new(records))
    }
}

impl From<FilePayload> for Reply {
    fn from(file: FilePayload) -> Self {
        Self::File(file)
    }
}

impl From<http::Response<Bytes>> for Reply {
    fn from(response: http::Response<Bytes>) -> Self {
        Self::Response(response)
    }
}

impl From<()> for Reply {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Reply>> From<Option<T>> for Reply {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_replies_are_json() {
        assert!(matches!(Reply::from("ok"), Reply::Json(Value::String(s)) if s == "ok"));
        assert!(matches!(Reply::from(String::from("ok")), Reply::Json(_)));
    }

    #[test]
    fn test_rows_and_status() {
        assert!(matches!(Reply::from(vec![json!(1)]), Reply::Rows(rows) if rows.len() == 1));
        assert!(matches!(Reply::from(404u16), Reply::Status(404)));
    }

    #[test]
    fn test_tuple_nests_inner_reply() {
        let reply = Reply::from((202u16, (201u16, "x")));

        match reply {
            Reply::WithStatus(status, inner) => {
                assert_eq!(status, json!(202));
                assert!(matches!(*inner, Reply::WithStatus(..)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_option_and_unit() {
        assert!(matches!(Reply::from(Some(json!([1]))), Reply::Json(_)));
        assert!(matches!(Reply::from(None::<Value>), Reply::Empty));
        assert!(matches!(Reply::from(()), Reply::Empty));
    }

    #[test]
    fn test_other_and_debug() {
        let reply = Reply::other(3.5);
        assert!(matches!(&reply, Reply::Other(s) if s == "3.5"));
        assert_eq!(format!("{reply:?}"), "Other(\"3.5\")");
    }

    #[test]
    fn test_records_from_record_set() {
        let reply = Reply::from(RecordSet::new());
        assert_eq!(format!("{reply:?}"), "Records { count: 0 }");
    }
}
