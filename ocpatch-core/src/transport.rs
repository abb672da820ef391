use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JSON_PATCH: &str = "application/json-patch+json";

/// A server response: status code and decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// The `message` field of an API `Status` body, if any.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Request headers. The bearer token is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Headers(Vec<(&'static str, String)>);

impl Headers {
    fn with_content_type(token: &str, content_type: &str) -> Headers {
        Headers(vec![
            ("Content-Type", content_type.to_string()),
            ("Accept", CONTENT_TYPE_JSON.to_string()),
            ("pretty", "true".to_string()),
            ("Authorization", format!("Bearer {}", token)),
        ])
    }

    pub fn for_get(token: &str) -> Headers {
        Self::with_content_type(token, CONTENT_TYPE_JSON)
    }

    pub fn for_patch(token: &str) -> Headers {
        Self::with_content_type(token, CONTENT_TYPE_JSON_PATCH)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| {
                if k == "Authorization" {
                    (k, "Bearer <redacted>")
                } else {
                    (k, v)
                }
            }))
            .finish()
    }
}

/// Performs the HTTP calls of an invocation.
///
/// Implementations return `Err` only for transport-level failures; any
/// response the server sends, whatever its status, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response>;

    async fn patch(
        &self,
        url: &str,
        headers: &Headers,
        payload: &json_patch::Patch,
    ) -> Result<Response>;
}
