//! Persisted slot codec.
//!
//! # Responsibility
//! - Encode the full collection into the slot payload (JSON array).
//! - Decode slot payloads defensively, defaulting missing or unknown fields.
//!
//! # Invariants
//! - Encoding writes exactly `text`, `priority`, `dueDate`, `completed`.
//! - Decoding never yields a record with blank text.
//! - Element order is preserved in both directions.

use crate::model::todo::{Priority, TodoRecord, DUE_DATE_FORMAT};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot payload could not be interpreted as a collection.
#[derive(Debug)]
pub enum ParseError {
    /// Payload is not valid JSON.
    Json(serde_json::Error),
    /// Payload is valid JSON but its top-level value is not an array.
    NotAnArray(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed todo payload: {err}"),
            Self::NotAnArray(found) => {
                write!(f, "todo payload must be a JSON array, found {found}")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray(_) => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Result of decoding a slot payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCollection {
    pub records: Vec<TodoRecord>,
    /// Number of array elements dropped because they could not form a record.
    pub skipped: usize,
}

/// Serializes the collection into the slot payload.
///
/// # Errors
/// - Propagates `serde_json` failures (not expected for well-formed records).
pub fn encode_collection(records: &[TodoRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Parses a slot payload with per-element schema checks.
///
/// `null` is accepted as an empty collection.
///
/// # Errors
/// - Returns `ParseError` when the payload is not JSON or not an array.
pub fn decode_collection(payload: &str) -> Result<DecodedCollection, ParseError> {
    let value: Value = serde_json::from_str(payload)?;
    let elements = match value {
        Value::Array(elements) => elements,
        Value::Null => return Ok(DecodedCollection::default()),
        other => return Err(ParseError::NotAnArray(json_kind(&other))),
    };

    let mut decoded = DecodedCollection {
        records: Vec::with_capacity(elements.len()),
        skipped: 0,
    };
    for element in elements {
        match element.as_object().and_then(decode_record) {
            Some(record) => decoded.records.push(record),
            None => decoded.skipped += 1,
        }
    }

    Ok(decoded)
}

fn decode_record(object: &Map<String, Value>) -> Option<TodoRecord> {
    let text = object.get("text").and_then(Value::as_str)?;
    let priority = object
        .get("priority")
        .and_then(Value::as_str)
        .and_then(|value| value.parse::<Priority>().ok())
        .unwrap_or_default();
    let due_date = object
        .get("dueDate")
        .and_then(Value::as_str)
        .and_then(|value| NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT).ok());
    let completed = object
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    TodoRecord::restore(text, priority, due_date, completed).ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
