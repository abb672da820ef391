use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PORT: u16 = 443;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Invocation parameters, as supplied by the caller.
///
/// ```json
/// {
///   "token": "sha256~...",
///   "host": "myocp.companyname.local",
///   "namespace": "demo-namespace",
///   "object": {
///     "name": "demo-configmap",
///     "type": "configmap",
///     "operation": "replace",
///     "path": "/data/key",
///     "value": "new value"
///   }
/// }
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub token: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub namespace: String,
    pub object: ObjectParams,
}

/// What to do, and to which object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectParams {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("namespace", &self.namespace)
            .field("object", &self.object)
            .finish()
    }
}
