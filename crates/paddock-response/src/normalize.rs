//! Reply classification.

use crate::file::FilePayload;
use crate::reply::Reply;
use bytes::Bytes;
use http::StatusCode;
use paddock_core::{Collection, ContractViolation, Record};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The body a normalized response carries.
pub enum Payload {
    /// A single record, serialized with the resource's field list.
    Record(Arc<dyn Record>),
    /// A collection of records, paginated before serialization.
    Records(Box<dyn Collection>),
    /// A raw string body.
    Text(String),
    /// A JSON value.
    Json(Value),
    /// An attachment.
    File(FilePayload),
    /// No body.
    Empty,
    /// A response built by the handler itself.
    Passthrough(http::Response<Bytes>),
}

/// The content family of a [`Payload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// JSON (or JSONP) body.
    Json,
    /// `text/plain` body.
    Text,
    /// Attachment with a guessed content type.
    File,
    /// No body.
    Empty,
    /// Whatever the handler built.
    Passthrough,
}

impl Payload {
    /// Returns the content family.
    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        match self {
            Self::Record(_) | Self::Records(_) | Self::Json(_) => ContentKind::Json,
            Self::Text(_) => ContentKind::Text,
            Self::File(_) => ContentKind::File,
            Self::Empty => ContentKind::Empty,
            Self::Passthrough(_) => ContentKind::Passthrough,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => f.debug_tuple("Record").field(&record.to_string()).finish(),
            Self::Records(collection) => f
                .debug_struct("Records")
                .field("count", &collection.count())
                .finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::File(file) => f.debug_tuple("File").field(&file.name()).finish(),
            Self::Empty => f.write_str("Empty"),
            Self::Passthrough(response) => f
                .debug_tuple("Passthrough")
                .field(&response.status())
                .finish(),
        }
    }
}

/// A classified handler return: the status and the body to render.
#[derive(Debug)]
pub struct NormalizedResponse {
    status: StatusCode,
    payload: Payload,
}

impl NormalizedResponse {
    /// Creates a normalized response.
    #[must_use]
    pub fn new(status: StatusCode, payload: Payload) -> Self {
        Self { status, payload }
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the payload's content family.
    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        self.payload.content_kind()
    }

    /// Splits into status and payload.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, Payload) {
        (self.status, self.payload)
    }
}

/// Classifies a handler return.
///
/// Explicit statuses nest: in `(202, (201, x))` the innermost status wins.
///
/// # Errors
///
/// Returns [`ContractViolation`] when an explicit status is not an integer
/// HTTP status (100 to 999).
pub fn normalize(reply: Reply) -> Result<NormalizedResponse, ContractViolation> {
    classify(reply, StatusCode::OK, false)
}

fn classify(
    reply: Reply,
    status: StatusCode,
    overridden: bool,
) -> Result<NormalizedResponse, ContractViolation> {
    let payload = match reply {
        Reply::WithStatus(explicit, inner) => {
            let status = explicit_status(&explicit)?;
            return classify(*inner, status, true);
        }
        Reply::Response(mut response) => {
            if overridden {
                *response.status_mut() = status;
            }
            let status = response.status();
            return Ok(NormalizedResponse::new(status, Payload::Passthrough(response)));
        }
        Reply::Records(collection) => Payload::Records(collection),
        Reply::Record(record) => Payload::Record(record),
        Reply::Empty => Payload::Empty,
        Reply::Status(code) => {
            let status = status_from_i64(code)?;
            return Ok(NormalizedResponse::new(status, Payload::Empty));
        }
        Reply::Json(value) => Payload::Json(value),
        Reply::File(file) => Payload::File(file),
        Reply::Rows(rows) => Payload::Json(Value::Array(rows)),
        Reply::Other(text) => Payload::Text(text),
    };
    Ok(NormalizedResponse::new(status, payload))
}

fn explicit_status(value: &Value) -> Result<StatusCode, ContractViolation> {
    match value.as_i64() {
        Some(code) => status_from_i64(code),
        None => Err(ContractViolation::invalid_status(value)),
    }
}

fn status_from_i64(code: i64) -> Result<StatusCode, ContractViolation> {
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ContractViolation::invalid_status(code))
}
