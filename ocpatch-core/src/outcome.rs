use serde::{Serialize, Serializer};
use serde_json::Value;

/// Rendered in place of values that do not apply to an outcome.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Success,
    Failure,
}

/// The result of one invocation.
///
/// Serializes to the reporting format:
///
/// ```json
/// { "changed": true, "failed": false, "msg": "...", "status_code": 200,
///   "json": {...}, "new_value": "new", "old_value": "old", "test": "N/A" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub changed: bool,
    #[serde(rename = "failed", serialize_with = "serialize_failed")]
    pub terminal: Terminal,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(serialize_with = "or_not_applicable")]
    pub status_code: Option<u16>,
    #[serde(rename = "json")]
    pub body: Value,
    #[serde(serialize_with = "or_not_applicable")]
    pub new_value: Option<Value>,
    #[serde(serialize_with = "or_not_applicable")]
    pub old_value: Option<Value>,
    #[serde(rename = "test", serialize_with = "or_not_applicable")]
    pub test_result: Option<bool>,
}

impl Outcome {
    pub(crate) fn new(
        terminal: Terminal,
        message: impl Into<String>,
        status: u16,
        body: Value,
    ) -> Self {
        Outcome {
            changed: false,
            terminal,
            message: message.into(),
            status_code: Some(status),
            body,
            new_value: None,
            old_value: None,
            test_result: None,
        }
    }

    pub(crate) fn success(message: impl Into<String>, status: u16, body: Value) -> Self {
        Self::new(Terminal::Success, message, status, body)
    }

    pub(crate) fn failure(message: impl Into<String>, status: u16, body: Value) -> Self {
        Self::new(Terminal::Failure, message, status, body)
    }

    /// Failure decided locally, without a mutating call. `body` is the
    /// current state of the object.
    pub(crate) fn short_circuit(message: impl Into<String>, body: Value) -> Self {
        Outcome {
            status_code: None,
            ..Self::failure(message, 0, body)
        }
    }

    pub(crate) fn changed(self, changed: bool) -> Self {
        Outcome { changed, ..self }
    }

    pub(crate) fn values(self, old_value: Option<Value>, new_value: Option<Value>) -> Self {
        Outcome {
            old_value,
            new_value,
            ..self
        }
    }

    pub(crate) fn test_result(self, result: bool) -> Self {
        Outcome {
            test_result: Some(result),
            ..self
        }
    }

    pub fn is_failure(&self) -> bool {
        self.terminal == Terminal::Failure
    }
}

fn serialize_failed<S: Serializer>(terminal: &Terminal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_bool(*terminal == Terminal::Failure)
}

fn or_not_applicable<S: Serializer, T: Serialize>(
    value: &Option<T>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => v.serialize(s),
        None => s.serialize_str(NOT_APPLICABLE),
    }
}
