//! Raw upstream payloads, before any normalization.

use serde_json::{Map, Value};

use crate::errors::{Error, Result};

/// What a data source hands back for one call.
///
/// Depending on the endpoint this is a JSON document, a JSON document that
/// arrives encoded as a string, or delimited text. A payload is consumed
/// exactly once by whichever normalizer or decoder the handler picks.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Json(Value),
    Text(String),
}

impl RawPayload {
    /// Returns the payload as a JSON value, parsing string-encoded documents.
    ///
    /// Text that does not parse as JSON is kept as a JSON string so that
    /// passthrough handlers still have something to return.
    pub fn into_value(self) -> Value {
        match self {
            RawPayload::Json(Value::String(s)) | RawPayload::Text(s) => {
                serde_json::from_str(&s).unwrap_or(Value::String(s))
            }
            RawPayload::Json(v) => v,
        }
    }

    /// Returns the payload as a JSON object, parsing string-encoded documents.
    ///
    /// Anything that is not (or does not decode to) an object is a
    /// [`Error::MalformedUpstreamShape`].
    pub fn into_object(self) -> Result<Map<String, Value>> {
        match self.into_value() {
            Value::Object(map) => Ok(map),
            Value::String(_) => Err(Error::MalformedUpstreamShape(
                "expected a JSON document, got undecodable text".to_string(),
            )),
            other => Err(Error::MalformedUpstreamShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the payload as delimited text.
    ///
    /// A JSON string is unwrapped; any other JSON value is rendered, which
    /// lets a tabular decoder see (and drop) an unexpected error document
    /// instead of failing.
    pub fn into_text(self) -> String {
        match self {
            RawPayload::Text(s) | RawPayload::Json(Value::String(s)) => s,
            RawPayload::Json(v) => v.to_string(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, RawPayload::Text(_) | RawPayload::Json(Value::String(_)))
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload::Json(value)
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
