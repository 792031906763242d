//! JSON shapes exchanged with the rephrase backend.
//!
//! Stream payloads are decoded loosely: a field counts as present when it is
//! truthy (non-empty string, `true`, non-zero number, array or object), and
//! fields other than `done`, `cancelled`, `style`, `delta` and `error` are
//! ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    Done,
    Cancelled,
    StyleError { style: String, message: String },
    Delta { style: String, delta: String },
}

impl WireEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WireEvent::Done | WireEvent::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CancelRequest<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobCreated {
    pub session_id: String,
}

/// Body of a `/cancel` response. Only logged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CancelAck {
    #[serde(default)]
    pub status: Option<String>,
}

/// Decodes one SSE `data` payload.
///
/// Returns `Ok(None)` for well-formed JSON that matches no known event shape,
/// and an error when the payload is not JSON at all.
pub fn decode_event(data: &str) -> Result<Option<WireEvent>, serde_json::Error> {
    let value: Value = serde_json::from_str(data)?;
    let Value::Object(fields) = value else {
        return Ok(None);
    };

    if truthy(fields.get("cancelled")) {
        return Ok(Some(WireEvent::Cancelled));
    }
    if truthy(fields.get("done")) {
        return Ok(Some(WireEvent::Done));
    }
    if let (Some(message), Some(style)) = (text_field(&fields, "error"), text_field(&fields, "style")) {
        return Ok(Some(WireEvent::StyleError {
            style: style.to_owned(),
            message: message.to_owned(),
        }));
    }
    if let (Some(style), Some(delta)) = (text_field(&fields, "style"), text_field(&fields, "delta")) {
        return Ok(Some(WireEvent::Delta {
            style: style.to_owned(),
            delta: delta.to_owned(),
        }));
    }
    Ok(None)
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    match fields.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
