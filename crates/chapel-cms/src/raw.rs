//! Raw event records as returned by the CMS.
//!
//! The CMS is edited by hand, so any field may be missing, `null`, or of an
//! unexpected type. [`RawEvent`] keeps what could be read and leaves the
//! rest as `None`; it never rejects a record because of one bad field.
//!
//! Both the flat record layout and the older layout that nests fields under
//! `attributes` are accepted:
//!
//! ```text
//! { "id": 1, "title": "Youth Night", ... }
//! { "id": 1, "attributes": { "title": "Youth Night", ... } }
//! ```

use serde_json::{Map, Value};

/// One event record before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEvent {
    pub id: Option<i64>,
    pub document_id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    /// The image field exactly as received.
    pub image: Option<Value>,
}

impl RawEvent {
    /// Reads a record from one element of a `data` array.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let top = value.as_object()?;
        let fields = top
            .get("attributes")
            .and_then(Value::as_object)
            .unwrap_or(top);

        Some(Self {
            id: top.get("id").and_then(as_i64),
            document_id: text(top, "documentId").or_else(|| text(fields, "documentId")),
            slug: text(fields, "slug"),
            title: text(fields, "title"),
            start_datetime: text(fields, "startDatetime"),
            end_datetime: text(fields, "endDatetime"),
            tags: text(fields, "tags"),
            description: text(fields, "description"),
            location: text(fields, "location"),
            city: text(fields, "city"),
            image: fields.get("image").filter(|v| !v.is_null()).cloned(),
        })
    }
}

/// Reads the `data` array of a collection response.
///
/// Non-object elements are skipped; a missing or non-array `data` yields no
/// records.
pub fn events_from_envelope(envelope: &Value) -> Vec<RawEvent> {
    envelope
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(RawEvent::from_value).collect())
        .unwrap_or_default()
}

/// Returns the `data` object of a single-type response, if present.
pub fn single_from_envelope(envelope: &Value) -> Option<&Map<String, Value>> {
    let data = envelope.get("data")?.as_object()?;
    Some(
        data.get("attributes")
            .and_then(Value::as_object)
            .unwrap_or(data),
    )
}

/// Reads a string field; numbers and booleans are rendered as text.
pub(crate) fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
