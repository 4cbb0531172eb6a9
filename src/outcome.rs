// file: src/outcome.rs
// version: 1.0.0
// guid: 34adb690-4287-4c0d-ac08-56692ea7f3eb

//! Payloads parsed from tool output and the status report printed by the CLI

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What a tool printed on stdout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decode stdout as JSON, keeping the raw text when it is not JSON
    pub fn parse(stdout: &str) -> Self {
        match serde_json::from_str(stdout) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(stdout.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Plain text form, trimmed.
    ///
    /// JSON strings are unwrapped; other JSON values are rendered compactly.
    pub fn text(&self) -> String {
        match self {
            Payload::Text(text) => text.trim().to_string(),
            Payload::Json(Value::String(s)) => s.trim().to_string(),
            Payload::Json(value) => value.to_string(),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => f.write_str(text),
            Payload::Json(value) => write!(f, "{}", value),
        }
    }
}

/// Status tag paired with a payload or an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok { payload: Value },
    Error { message: String },
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ToolError::from)
    }
}

impl<T: Into<Value>> From<Result<T>> for Outcome {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(payload) => Outcome::Ok {
                payload: payload.into(),
            },
            Err(e) => Outcome::Error {
                message: e.message(),
            },
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_json()
    }
}
