//! Server error envelope detection.
//!
//! Two shapes are recognised at the top level of a response document:
//!
//! - `{"error": ..., "error_description": ..., "code": ...}`
//! - `{"_retVal": ..., "_errors": [{"_errorMsg": ..., "_errorNum": ..., "_errorType": ...}]}`
//!
//! Either key with a non-null value is enough for a document to count as an
//! error envelope. A `null` value is read as "no error".

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ERROR_KEY: &str = "error";
const ERRORS_KEY: &str = "_errors";

/// An error reported by the server in place of a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    /// Short error text or code from the `error` key.
    pub error: Option<String>,

    /// Longer description from `error_description`.
    pub description: Option<String>,

    /// Numeric or textual code from `code`.
    pub code: Option<Value>,

    /// Return value from `_retVal`.
    pub return_value: Option<Value>,

    /// Individual entries from `_errors`.
    pub errors: Vec<ErrorDetail>,

    raw: Value,
}

/// One entry of an `_errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "_errorMsg", default)]
    pub message: Option<String>,

    #[serde(rename = "_errorNum", default)]
    pub number: Option<i64>,

    #[serde(rename = "_errorType", default)]
    pub kind: Option<String>,
}

impl ErrorEnvelope {
    /// Inspect a top-level JSON object; returns the envelope if it has an error shape.
    pub fn detect(object: &Map<String, Value>) -> Option<Self> {
        let present = |key: &str| object.get(key).is_some_and(|v| !v.is_null());
        if !present(ERROR_KEY) && !present(ERRORS_KEY) {
            return None;
        }

        let errors = match object.get(ERRORS_KEY) {
            Some(Value::Array(items)) => items.iter().map(ErrorDetail::from_value).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![ErrorDetail::from_value(other)],
        };

        Some(Self {
            error: object.get(ERROR_KEY).and_then(text),
            description: object.get("error_description").and_then(text),
            code: object.get("code").filter(|v| !v.is_null()).cloned(),
            return_value: object.get("_retVal").filter(|v| !v.is_null()).cloned(),
            errors,
            raw: Value::Object(object.clone()),
        })
    }

    /// The envelope exactly as the server sent it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Most specific message available, if any.
    pub fn message(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or_else(|| self.errors.iter().find_map(|e| e.message.as_deref()))
            .or(self.error.as_deref())
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error.as_deref(), self.message()) {
            (Some(error), Some(message)) if error != message => write!(f, "{}: {}", error, message)?,
            (_, Some(message)) => write!(f, "{}", message)?,
            (Some(error), None) => write!(f, "{}", error)?,
            (None, None) => write!(f, "unspecified server error")?,
        }

        if let Some(number) = self.errors.iter().find_map(|e| e.number) {
            write!(f, " (error {})", number)?;
        }
        Ok(())
    }
}

impl ErrorDetail {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_else(|_| Self {
                message: value.get("_errorMsg").and_then(text),
                ..Self::default()
            }),
            other => Self {
                message: text(other),
                ..Self::default()
            },
        }
    }
}

/// Render a scalar as text; objects and arrays are serialised.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
